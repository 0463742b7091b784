/*!

The dimension-ordered allocator: contention for an output port is resolved by a
fixed dimensional priority of the requesting input ports, with a per-output
round-robin pointer breaking ties inside a priority class.

The priority order is vertical first: Z over Y over X, with the processing
element always last. Flits already descending (or ascending) keep moving, which
drains the vertical columns the elevator routing funnels traffic through.

*/

use ::rand::rngs::StdRng;

use crate::allocator::{Allocator,GrantedRequests,Request};

///The allocator of the unidirectional torus routers.
///Owns the per-output grant pointers, which persist from cycle to cycle.
#[derive(Debug)]
pub struct DorAllocator
{
	///The number of inputs of the router crossbar.
	num_clients: usize,
	///The number of outputs of the router crossbar.
	num_resources: usize,
	///Dimensional priority of each input port. Lower is served first.
	input_priorities: Vec<usize>,
	///Round-robin pointer of each output port.
	grant_pointers: Vec<usize>,
	///The requests of the current cycle.
	requests: Vec<Request>,
	debug: bool,
}

impl DorAllocator
{
	pub fn new(num_clients:usize, num_resources:usize, num_dims:usize) -> DorAllocator
	{
		if num_clients==0 || num_resources==0
		{
			panic!("Invalid sizes for the DorAllocator");
		}
		let input_priorities=DorAllocator::input_priorities(num_clients,num_dims);
		DorAllocator{
			num_clients,
			num_resources,
			input_priorities,
			grant_pointers: vec![0;num_resources],
			requests: Vec::new(),
			debug: false,
		}
	}
	pub fn with_debug(mut self, debug:bool) -> DorAllocator
	{
		self.debug=debug;
		self
	}
	///Map input ports to dimensional priorities for the standard port layouts.
	fn input_priorities(num_clients:usize, num_dims:usize) -> Vec<usize>
	{
		let mut priorities=vec![0;num_clients];
		if num_dims==3 && num_clients==4
		{
			//0=X, 1=Y, 2=Z, 3=PE
			priorities[0]=2;
			priorities[1]=1;
			priorities[2]=0;
			priorities[3]=3;
		}
		else if num_dims==3 && num_clients==7
		{
			//0=East, 1=West, 2=South, 3=North, 4=Up, 5=Down, 6=PE
			priorities[0]=2;
			priorities[1]=2;
			priorities[2]=1;
			priorities[3]=1;
			priorities[4]=0;
			priorities[5]=0;
			priorities[6]=3;
		}
		else if num_dims==2
		{
			//0=X, 1=Y, PE last
			priorities[0]=1;
			priorities[1]=0;
			priorities[num_clients-1]=2;
		}
		else
		{
			//higher dimensions first, PE last
			for input in 0..num_clients-1
			{
				priorities[input]=num_clients-2-input;
			}
			priorities[num_clients-1]=num_clients;
		}
		priorities
	}
	pub fn input_priority(&self, input:usize) -> usize
	{
		self.input_priorities[input]
	}
	///The round-robin pointer of an output port.
	pub fn grant_pointer(&self, output:usize) -> usize
	{
		self.grant_pointers[output]
	}
	fn is_valid_request(&self, request:&Request) -> bool
	{
		request.client<self.num_clients && request.resource<self.num_resources
	}
}

impl Allocator for DorAllocator
{
	fn add_request(&mut self, request:Request)
	{
		if !self.is_valid_request(&request)
		{
			panic!("The request client={} resource={} is not valid",request.client,request.resource);
		}
		self.requests.push(request);
	}
	///For each output port in increasing index, grant the unmatched requesting
	///input of best dimensional priority; ties go round-robin from the grant
	///pointer. Outputs decided later observe the matches of earlier ones.
	fn perform_allocation(&mut self, _rng:&mut StdRng) -> GrantedRequests
	{
		let mut gr=GrantedRequests::default();
		let mut in_match:Vec<Option<usize>>=vec![None;self.num_clients];
		let mut out_match:Vec<Option<usize>>=vec![None;self.num_resources];
		for resource in 0..self.num_resources
		{
			if out_match[resource].is_some()
			{
				continue;
			}
			let pointer=self.grant_pointers[resource];
			let mut best: Option<(usize,usize)> = None;//(client, priority)
			for request in self.requests.iter().filter(|request|request.resource==resource)
			{
				let client=request.client;
				if in_match[client].is_some()
				{
					continue;
				}
				let priority=self.input_priorities[client];
				let better=match best
				{
					None => true,
					Some((best_client,best_priority)) =>
					{
						if priority!=best_priority
						{
							priority<best_priority
						}
						else
						{
							//first candidate at or after the pointer wins
							let da=(client+self.num_clients-pointer)%self.num_clients;
							let db=(best_client+self.num_clients-pointer)%self.num_clients;
							da<db
						}
					},
				};
				if better
				{
					best=Some((client,priority));
				}
			}
			if let Some((winner,priority))=best
			{
				in_match[winner]=Some(resource);
				out_match[resource]=Some(winner);
				gr.add_granted_request(Request::new(winner,resource,Some(priority)));
				//unmatched outputs do not advance their pointer
				self.grant_pointers[resource]=(winner+1)%self.num_clients;
			}
		}
		if self.debug
		{
			let granted:Vec<String>=gr.granted_requests.iter().map(|request|format!("Out{}<-In{}(P{})",request.resource,request.client,self.input_priorities[request.client])).collect();
			println!("DorAllocator grants: {}",granted.join(" "));
		}
		self.requests.clear();
		gr
	}
	fn support_intransit_priority(&self) -> bool
	{
		false
	}
}
