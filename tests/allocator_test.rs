mod common;

use ascensor_lib::allocator::{Allocator,DorAllocator,Request};

use ::rand::rngs::StdRng;
use rand::SeedableRng;

///Collect the grants into a per-output vector, `None` for unmatched outputs.
fn grant_vector(allocator:&mut DorAllocator, rng:&mut StdRng, num_outputs:usize) -> Vec<Option<usize>>
{
	let mut grants=vec![None;num_outputs];
	for request in allocator.perform_allocation(rng)
	{
		assert!(grants[request.resource].is_none(),"output {} granted twice",request.resource);
		grants[request.resource]=Some(request.client);
	}
	grants
}

#[test]
fn dimensional_priorities_win()
{
	//input 2 (Z) and input 1 (Y) contend for output 0, input 0 (X) asks for output 1
	let mut rng=StdRng::seed_from_u64(1u64);
	let mut allocator=DorAllocator::new(4,4,3);
	allocator.add_request(Request::new(2,0,None));
	allocator.add_request(Request::new(1,0,None));
	allocator.add_request(Request::new(0,1,None));
	let grants=grant_vector(&mut allocator,&mut rng,4);
	assert_eq!(grants,vec![Some(2),Some(0),None,None]);
	assert_eq!(allocator.grant_pointer(0),3);
	assert_eq!(allocator.grant_pointer(1),1);
	//unmatched outputs keep their pointer
	assert_eq!(allocator.grant_pointer(2),0);
	assert_eq!(allocator.grant_pointer(3),0);
}

#[test]
fn round_robin_breaks_ties_from_the_pointer()
{
	//seven-port layout: inputs 4 (Up) and 5 (Down) share the top priority
	let mut rng=StdRng::seed_from_u64(2u64);
	let mut allocator=DorAllocator::new(7,7,3);
	//drive the pointer of output 0 to 5 by granting input 4 alone
	allocator.add_request(Request::new(4,0,None));
	let grants=grant_vector(&mut allocator,&mut rng,7);
	assert_eq!(grants[0],Some(4));
	assert_eq!(allocator.grant_pointer(0),5);
	//with the pointer at 5, input 5 is the first tied candidate at or after it
	allocator.add_request(Request::new(4,0,None));
	allocator.add_request(Request::new(5,0,None));
	let grants=grant_vector(&mut allocator,&mut rng,7);
	assert_eq!(grants[0],Some(5));
	assert_eq!(allocator.grant_pointer(0),6);
	//with the pointer at 6 the round wraps back to input 4
	allocator.add_request(Request::new(4,0,None));
	allocator.add_request(Request::new(5,0,None));
	let grants=grant_vector(&mut allocator,&mut rng,7);
	assert_eq!(grants[0],Some(4));
	assert_eq!(allocator.grant_pointer(0),5);
}

#[test]
fn matching_is_exclusive()
{
	//every input requests every output; the matching must pair them one to one
	let mut rng=StdRng::seed_from_u64(3u64);
	let mut allocator=DorAllocator::new(4,4,3);
	for cycle in 0..8
	{
		for client in 0..4
		{
			for resource in 0..4
			{
				allocator.add_request(Request::new(client,resource,None));
			}
		}
		let mut client_seen=[false;4];
		let mut resource_seen=[false;4];
		let granted:Vec<_>=allocator.perform_allocation(&mut rng).into_iter().collect();
		assert_eq!(granted.len(),4,"a full request matrix must saturate the crossbar at cycle {}",cycle);
		for request in granted
		{
			assert!(!client_seen[request.client],"input {} matched twice",request.client);
			assert!(!resource_seen[request.resource],"output {} matched twice",request.resource);
			client_seen[request.client]=true;
			resource_seen[request.resource]=true;
		}
	}
}

#[test]
fn later_outputs_observe_earlier_matches()
{
	//input 2 asks for outputs 0 and 1; once granted output 0 it cannot take
	//output 1, which falls to the lower-priority input 1
	let mut rng=StdRng::seed_from_u64(4u64);
	let mut allocator=DorAllocator::new(4,4,3);
	allocator.add_request(Request::new(2,0,None));
	allocator.add_request(Request::new(2,1,None));
	allocator.add_request(Request::new(1,1,None));
	let grants=grant_vector(&mut allocator,&mut rng,4);
	assert_eq!(grants,vec![Some(2),Some(1),None,None]);
}

#[test]
fn equal_priority_contenders_share_the_output_fairly()
{
	//inputs 4 and 5 request output 0 continuously; within num_inputs cycles
	//each of them is granted at least once
	let mut rng=StdRng::seed_from_u64(5u64);
	let mut allocator=DorAllocator::new(7,7,3);
	let mut granted_cycles=[0usize;7];
	for _cycle in 0..7
	{
		allocator.add_request(Request::new(4,0,None));
		allocator.add_request(Request::new(5,0,None));
		let grants=grant_vector(&mut allocator,&mut rng,7);
		granted_cycles[grants[0].expect("a contended output must be granted")]+=1;
	}
	assert!(granted_cycles[4]>=1);
	assert!(granted_cycles[5]>=1);
	assert_eq!(granted_cycles[4]+granted_cycles[5],7);
}

#[test]
fn processing_element_yields_to_transit()
{
	//the injection port has the lowest priority in every layout
	let mut rng=StdRng::seed_from_u64(6u64);
	let mut allocator=DorAllocator::new(4,4,3);
	allocator.add_request(Request::new(3,2,None));
	allocator.add_request(Request::new(0,2,None));
	let grants=grant_vector(&mut allocator,&mut rng,4);
	assert_eq!(grants[2],Some(0));
	//alone, the injection port is served
	allocator.add_request(Request::new(3,2,None));
	let grants=grant_vector(&mut allocator,&mut rng,4);
	assert_eq!(grants[2],Some(3));
}

#[test]
fn generic_layout_orders_by_dimension()
{
	//a 1D layout reverses the port order and keeps the server last
	let allocator=DorAllocator::new(3,3,1);
	assert_eq!(allocator.input_priority(0),1);
	assert_eq!(allocator.input_priority(1),0);
	assert_eq!(allocator.input_priority(2),3);
}
