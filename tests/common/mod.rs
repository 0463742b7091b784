use ascensor_lib::*;
use ascensor_lib::routing::{OutputSet,RoutingFunction,RoutingParams};
use ascensor_lib::topology::Location;

use ::rand::rngs::StdRng;

/*
	Auxiliary functions to build configurations and to follow routes hop by hop.
*/

///Join sizes into the brace-and-comma list syntax of the configuration.
pub fn list_value(values:&[usize]) -> String
{
	format!("{{{}}}",values.iter().map(|value|value.to_string()).collect::<Vec<_>>().join(","))
}

///Routing parameters for a plain network of the given sides.
pub fn params_for(sides:&[usize], num_vcs:usize) -> RoutingParams
{
	let sizes=list_value(sides);
	let vcs=num_vcs.to_string();
	let configuration=Configuration::from_pairs(&[
		("dim_sizes",&sizes),
		("num_vcs",&vcs),
	]);
	RoutingParams::new(&configuration).expect("could not build the routing parameters")
}

///A router with the classical Cartesian port layout: `2N` network ports plus
///the server ejection/injection pair at index `2N`.
pub fn classical_router(params:&RoutingParams, index:usize) -> Router
{
	let ports=2*params.num_dims()+1;
	Router::new(index,format!("router_{}",index),ports,ports)
}

///Ask a routing function for the injection ranges of a fresh flit and put the
///flit on the first channel offered.
pub fn inject_flit(function:RoutingFunction, params:&RoutingParams, flit:&mut Flit, rng:&mut StdRng)
{
	let router=classical_router(params,flit.src);
	let mut outputs=OutputSet::new();
	function(params,&router,flit,0,&mut outputs,true,rng);
	assert!(!outputs.is_empty(),"injection offered no virtual channels");
	let range=&outputs.ranges()[0];
	assert!(range.output_port.is_none(),"injection ranges must not carry a port");
	flit.vc=Some(range.vc_begin);
}

///Follow a route under a classical-layout routing function until ejection,
///returning the list of visited nodes (the source included). Multi-candidate
///routings advance through their first offer.
pub fn walk_classical(function:RoutingFunction, params:&RoutingParams, flit:&mut Flit, wraparound:bool, rng:&mut StdRng) -> Vec<usize>
{
	inject_flit(function,params,flit,rng);
	let n=params.num_dims();
	let mut cur=flit.src;
	let mut in_channel=2*n;
	let mut visited=vec![cur];
	loop
	{
		let router=classical_router(params,cur);
		let mut outputs=OutputSet::new();
		function(params,&router,flit,in_channel,&mut outputs,false,rng);
		assert!(!outputs.is_empty(),"no output offered at node {} toward {}",cur,flit.dest);
		let range=&outputs.ranges()[0];
		let port=range.output_port.expect("transit ranges must carry a port");
		if port==2*n
		{
			return visited;
		}
		flit.vc=Some(range.vc_begin);
		let dim=port/2;
		let side=params.cartesian.sides[dim];
		let mut coordinates=params.cartesian.unpack(cur);
		coordinates[dim]=if port%2==0
		{
			if wraparound { (coordinates[dim]+1)%side } else { coordinates[dim]+1 }
		}
		else
		{
			if wraparound { (coordinates[dim]+side-1)%side } else { coordinates[dim]-1 }
		};
		cur=params.cartesian.pack(&coordinates);
		//the reverse port of the link we just crossed
		in_channel=port^1;
		visited.push(cur);
		assert!(visited.len()<=1000,"the route from {} to {} does not terminate",flit.src,flit.dest);
	}
}

///Follow a route through a built `UniTorus`, using its channel wiring to find
///each next router. Returns the visited nodes, the source included.
pub fn walk_unitorus(function:RoutingFunction, network:&UniTorus, flit:&mut Flit, rng:&mut StdRng) -> Vec<usize>
{
	let params=network.params();
	let mut outputs=OutputSet::new();
	function(params,network.router(flit.src),flit,0,&mut outputs,true,rng);
	assert!(!outputs.is_empty(),"injection offered no virtual channels");
	flit.vc=Some(outputs.ranges()[0].vc_begin);
	let mut cur=flit.src;
	let mut visited=vec![cur];
	loop
	{
		let router=network.router(cur);
		let mut outputs=OutputSet::new();
		function(params,router,flit,0,&mut outputs,false,rng);
		assert!(!outputs.is_empty(),"no output offered at node {} toward {}",cur,flit.dest);
		let range=&outputs.ranges()[0];
		let port=range.output_port.expect("transit ranges must carry a port");
		if port==router.num_outputs()-1
		{
			return visited;
		}
		flit.vc=Some(range.vc_begin);
		let channel=router.output_channel(port);
		cur=match network.channels()[channel].sink
		{
			Location::RouterPort{router_index,..} => router_index,
			ref other => panic!("port {} of node {} leads to {:?}",port,cur,other),
		};
		visited.push(cur);
		assert!(visited.len()<=1000,"the route from {} to {} does not terminate",flit.src,flit.dest);
	}
}

///The forward ring distance summed over all dimensions.
pub fn unidirectional_distance(params:&RoutingParams, from:usize, to:usize) -> usize
{
	let from_coordinates=params.cartesian.unpack(from);
	let to_coordinates=params.cartesian.unpack(to);
	(0..params.num_dims()).map(|dim|{
		let side=params.cartesian.sides[dim];
		(to_coordinates[dim]+side-from_coordinates[dim])%side
	}).sum()
}

///The Manhattan distance of a mesh.
pub fn mesh_distance(params:&RoutingParams, from:usize, to:usize) -> usize
{
	let from_coordinates=params.cartesian.unpack(from);
	let to_coordinates=params.cartesian.unpack(to);
	(0..params.num_dims()).map(|dim|{
		let a=from_coordinates[dim] as i64;
		let b=to_coordinates[dim] as i64;
		(a-b).abs() as usize
	}).sum()
}
