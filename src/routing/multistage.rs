/*!

Routing for the indirect topologies: the destination-tag butterfly and the
nearest-common-ancestor family for trees.

All of these read the radix from the first dimension size and the number of
levels (or stages) from the dimension count, so a `k`-ary `n`-fly is configured
as `dim_sizes = {k,k,...,k}` with `n` entries. Down ports are numbered before
up ports everywhere.

*/

use ::rand::rngs::StdRng;

use crate::Flit;
use crate::router::Router;
use crate::routing::{class_vc_bounds,random_int,OutputSet,RoutingParams};

fn powi(base:usize, exponent:usize) -> usize
{
	base.pow(exponent as u32)
}

///The radix of the indirect topology. They are built with all sides equal.
fn radix(params:&RoutingParams) -> usize
{
	let k=params.cartesian.sides[0];
	debug_assert!(params.cartesian.sides.iter().all(|&side|side==k),"indirect topologies use a uniform radix");
	k
}

///Destination-tag routing in a butterfly: each stage consumes one digit of the
///destination, most significant first.
pub fn dest_tag_fly(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let k=radix(params);
	let n=params.num_dims();
	let mut stage=(router.get_index()*k)/params.num_nodes();
	let mut dest=flit.dest;
	//strip the digits the remaining stages will consume
	while stage<n-1
	{
		dest/=k;
		stage+=1;
	}
	outputs.add_range(dest%k,vc_begin,vc_end,0);
}

fn fattree_family(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng, adaptive:bool)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let k=radix(params);
	let n=params.num_dims();
	let dest=flit.dest;
	let router_id=router.get_index();
	let routers_per_level=powi(k,n-1);
	let pos=router_id%routers_per_level;
	let depth=router_id/routers_per_level;
	//nodes below this router, and which block of them it covers
	let coverage=powi(k,n-depth);
	let neighborhood=pos/powi(k,n-depth-1);
	let out_port=if dest>=neighborhood*coverage && dest<(neighborhood+1)*coverage
	{
		//the nearest common ancestor is reached: go down to the proper child
		if depth==n-1
		{
			dest%k
		}
		else
		{
			let branch_coverage=powi(k,n-depth-1);
			(dest-neighborhood*coverage)/branch_coverage
		}
	}
	else
	{
		//go up; a flit that still needs to ascend must have come from below
		assert!(in_channel<k,"an ascending flit must enter through a down port, not port {}",in_channel);
		if adaptive
		{
			let first=k+random_int(rng,k-1);
			let second=k+random_int(rng,k-1);
			if router.used_credit(first)>router.used_credit(second) { second } else { first }
		}
		else
		{
			k+random_int(rng,k-1)
		}
	};
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///Nearest-common-ancestor routing in a fat tree, ascending through a uniformly
///random up port.
pub fn fattree_nca(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	fattree_family(params,router,flit,in_channel,outputs,inject,rng,false);
}

///As `fattree_nca`, but the ascent picks two random up ports and keeps the one
///with fewer used credits.
pub fn fattree_anca(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	fattree_family(params,router,flit,in_channel,outputs,inject,rng,true);
}

//Quad-tree router ids encode the level and the position within it as level*256+position.
fn qtree_height_from_id(id:usize) -> usize
{
	id/256
}
fn qtree_pos_from_id(id:usize) -> usize
{
	id%256
}

///Nearest-common-ancestor routing in a tree with a single parent per router:
///down to the proper child when the destination hangs below, up otherwise.
pub fn qtree_nca(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let k=radix(params);
	let n=params.num_dims();
	let height=qtree_height_from_id(router.get_index());
	let pos=qtree_pos_from_id(router.get_index());
	let mut dest=flit.dest;
	for _level in height+1..n
	{
		dest/=k;
	}
	let out_port=if pos==dest/k
	{
		//the nearest common ancestor is reached going down
		dest%k
	}
	else
	{
		//the single up port follows the down ports
		k
	};
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

//The three-level radix-4 tree keeps 16 router positions per level and doubles
//the upward bandwidth: leaves own four up ports, middle routers two.
const TREE4_POSITIONS:usize = 16;

fn tree4_family(params:&RoutingParams, router:&Router, flit:&mut Flit, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng, adaptive:bool)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let dest=flit.dest;
	let height=router.get_index()/TREE4_POSITIONS;
	let pos=router.get_index()%TREE4_POSITIONS;
	//Some(range) asks for an ascent through `range` up ports after port 4.
	let (down_port,up_range)=match height
	{
		0 => (dest/16,None),
		1 =>
		{
			if dest/16==pos/4 { ((dest%16)/4,None) } else { (0,Some(2)) }
		},
		_ =>
		{
			if dest/4==pos { (dest%4,None) } else { (0,Some(4)) }
		},
	};
	let out_port=match up_range
	{
		None => down_port,
		Some(range) =>
		{
			if adaptive
			{
				let first=4+random_int(rng,range-1);
				let second=4+random_int(rng,range-1);
				if router.used_credit(first)>router.used_credit(second) { second } else { first }
			}
			else
			{
				4+random_int(rng,range-1)
			}
		},
	};
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///Nearest-common-ancestor routing in the three-level radix-4 tree, ascending
///through a uniformly random up port.
pub fn tree4_nca(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	tree4_family(params,router,flit,outputs,inject,rng,false);
}

///As `tree4_nca`, but the ascent picks two random up ports and keeps the one
///with fewer used credits.
pub fn tree4_anca(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	tree4_family(params,router,flit,outputs,inject,rng,true);
}
