/*!

Dimension-ordered primitives and the classical routing variants for meshes and
bidirectional tori.

These functions assume the classical Cartesian port layout: output `2d` goes in
the positive direction of dimension `d`, output `2d+1` in the negative one, and
output `2N` ejects into the server. Input ports mirror the outputs, with input
`2d` fed by the positive-side neighbour, and input `2N` being the injection
queue. Under that convention, flipping the low bit of the input port keeps a
flit moving in the same ring direction.

*/

use ::rand::rngs::StdRng;

use crate::Flit;
use crate::router::Router;
use crate::routing::{class_vc_bounds,random_int,OutputSet,RoutingParams,RoutingPhase,RoutingScratch};

///The next port of a dimension-ordered route in a mesh: the first mismatched
///dimension decides, in ascending order unless `descending` is set. Returns the
///ejection port `2N` at the destination.
pub fn dor_next_mesh(params:&RoutingParams, cur:usize, dest:usize, descending:bool) -> usize
{
	let n=params.num_dims();
	if cur==dest
	{
		return 2*n;
	}
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(dest);
	for index in 0..n
	{
		let dim=if descending { n-1-index } else { index };
		if cur_coordinates[dim]<dest_coordinates[dim]
		{
			return 2*dim;
		}
		if cur_coordinates[dim]>dest_coordinates[dim]
		{
			return 2*dim+1;
		}
	}
	unreachable!("cur!=dest but all coordinates match");
}

/**The next port of a dimension-ordered route in a torus, together with the ring
partition of the chosen direction.

When the flit is already travelling along the ring of the first mismatched
dimension, the low bit of the input port is inverted, which under the port
convention of this module keeps the packet moving in the same direction and
leaves the partition untouched. When turning into a new dimension the shorter
way around the ring is taken, ties drawn at random, and the partition is set by
the dateline rules: the deterministic dateline sits between `side-1` and `0`;
`balance` instead uses the two datelines of the balanced scheme, leaving the
partition random when neither is crossed.
**/
pub fn dor_next_torus(params:&RoutingParams, cur:usize, dest:usize, in_port:usize, partition:&mut usize, balance:bool, rng:&mut StdRng) -> usize
{
	let n=params.num_dims();
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(dest);
	let dim=match (0..n).find(|&dim|cur_coordinates[dim]!=dest_coordinates[dim])
	{
		None => return 2*n,//eject
		Some(dim) => dim,
	};
	if in_port<2*n && in_port/2==dim
	{
		return in_port^1;
	}
	//Turning into a new dimension.
	let side=params.cartesian.sides[dim] as i64;
	let c=cur_coordinates[dim] as i64;
	let d=dest_coordinates[dim] as i64;
	let dist2=side-2*((d-c+side)%side);
	let positive= dist2>0 || (dist2==0 && random_int(rng,1)==1);
	if balance
	{
		//Two datelines: one between side-1 and 0 forcing partition 1, another at the
		//half point forcing partition 0. Anywhere else either partition works.
		let half=(side-1)/2;
		*partition=if (positive && c>d) || (!positive && c<d)
		{
			1
		}
		else if (positive && c<=half && d>half) || (!positive && c>half && d<=half)
		{
			0
		}
		else
		{
			random_int(rng,1)
		};
	}
	else
	{
		//Deterministic dateline between side-1 and 0.
		*partition=if (positive && c>d) || (!positive && c<d) { 1 } else { 0 };
	}
	if positive { 2*dim } else { 2*dim+1 }
}

///Restrict a class range to the slice owned by the destination node.
fn destination_slice(params:&RoutingParams, dest:usize, vc_begin:&mut usize, vc_end:&mut usize)
{
	let vcs_per_dest=(*vc_end-*vc_begin+1)/params.num_nodes();
	assert!(vcs_per_dest>0,"the class range [{},{}] cannot be sliced among {} destinations",vc_begin,vc_end,params.num_nodes());
	*vc_begin+=dest*vcs_per_dest;
	*vc_end=*vc_begin+vcs_per_dest-1;
}

///Plain dimension-ordered routing on a mesh.
pub fn dim_order_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let out_port=dor_next_mesh(params,router.get_index(),flit.dest,false);
	if flit.watch
	{
		eprintln!("{} | flit {} | adding VC range [{},{}] at output port {} toward destination {}",router.full_name(),flit.id,vc_begin,vc_end,out_port,flit.dest);
	}
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///Dimension-ordered mesh routing over node-identified channels: each
///destination owns a slice of the class range.
pub fn dim_order_ni_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	//at the destination router the slicing is no longer needed
	if inject || router.get_index()!=flit.dest
	{
		destination_slice(params,flit.dest,&mut vc_begin,&mut vc_end);
	}
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let out_port=dor_next_mesh(params,router.get_index(),flit.dest,false);
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///As `dim_order_ni_mesh` but the slice is owned by the next-hop coordinate of
///the chosen output dimension rather than by the whole destination id.
pub fn dim_order_pni_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	let n=params.num_dims();
	//at injection the router is the source, so the first hop is the same computation
	let out_port=dor_next_mesh(params,router.get_index(),flit.dest,false);
	if inject || router.get_index()!=flit.dest
	{
		let out_dim=if out_port<2*n { out_port/2 } else { 0 };
		let side=params.cartesian.sides[out_dim];
		let next_coord=params.cartesian.unpack(flit.dest)[out_dim];
		let vcs_per_coord=(vc_end-vc_begin+1)/side;
		assert!(vcs_per_coord>0,"the class range [{},{}] cannot be sliced among the {} coordinates of dimension {}",vc_begin,vc_end,side,out_dim);
		vc_begin+=next_coord*vcs_per_coord;
		vc_end=vc_begin+vcs_per_coord-1;
	}
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
	}
	else
	{
		outputs.add_range(out_port,vc_begin,vc_end,0);
	}
}

fn dim_order_torus_family(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng, balance:bool, node_identified:bool)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	if node_identified && (inject || router.get_index()!=flit.dest)
	{
		destination_slice(params,flit.dest,&mut vc_begin,&mut vc_end);
	}
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let cur=router.get_index();
	let mut partition=match flit.scratch
	{
		RoutingScratch::TorusRing{partition,..} => partition,
		_ => 0,
	};
	let out_port=dor_next_torus(params,cur,flit.dest,in_channel,&mut partition,balance,rng);
	flit.scratch=RoutingScratch::TorusRing{
		phase: RoutingPhase::ToDestination,
		partition,
		intermediate: None,
	};
	//The ring partition splits the class range; the node-identified variant
	//relies on its destination slices instead and only tracks the partition.
	if cur!=flit.dest && !node_identified
	{
		let available_vcs=(vc_end-vc_begin+1)/2;
		assert!(available_vcs>0,"the ring partition needs at least two virtual channels in range [{},{}]",vc_begin,vc_end);
		if partition==0
		{
			vc_end-=available_vcs;
		}
		else
		{
			assert_eq!(partition,1);
			vc_begin+=available_vcs;
		}
	}
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///Dimension-ordered routing on a torus, with the dateline partition selecting
///the lower or upper half of the class range.
pub fn dim_order_torus(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	dim_order_torus_family(params,router,flit,in_channel,outputs,inject,rng,false,false);
}

///As `dim_order_torus` over node-identified channels: each destination owns a
///slice of the class range, which already separates the traffic, so the ring
///partition is tracked but keeps no channels of its own.
pub fn dim_order_ni_torus(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	dim_order_torus_family(params,router,flit,in_channel,outputs,inject,rng,false,true);
}

///As `dim_order_torus` but using the balanced pair of datelines.
pub fn dim_order_bal_torus(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	dim_order_torus_family(params,router,flit,in_channel,outputs,inject,rng,true,false);
}

fn xy_yx_family(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng, adaptive:bool)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	if cur==flit.dest
	{
		outputs.add_range(2*n,vc_begin,vc_end,0);
		return;
	}
	//each class must keep at least two channels or the order could not be bound
	let available_vcs=(vc_end-vc_begin+1)/2;
	assert!(available_vcs>0,"xy_yx needs at least two virtual channels in range [{},{}]",vc_begin,vc_end);
	let x_then_y=if in_channel==2*n
	{
		//the order is decided at the first router and bound through the channel halves
		if adaptive
		{
			let out_xy=dor_next_mesh(params,cur,flit.dest,false);
			let out_yx=dor_next_mesh(params,cur,flit.dest,true);
			let credit_xy=router.used_credit(out_xy);
			let credit_yx=router.used_credit(out_yx);
			if credit_xy>credit_yx
			{
				false
			}
			else if credit_xy<credit_yx
			{
				true
			}
			else
			{
				random_int(rng,1)>0
			}
		}
		else
		{
			random_int(rng,1)>0
		}
	}
	else
	{
		flit.vc.expect("a flit in transit must carry its virtual channel")<vc_begin+available_vcs
	};
	let out_port=dor_next_mesh(params,cur,flit.dest,!x_then_y);
	if x_then_y
	{
		vc_end-=available_vcs;
	}
	else
	{
		vc_begin+=available_vcs;
	}
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///Route either in XY or in YX dimension order, drawn at the first router and
///bound for the rest of the route by the half of the class range in use.
pub fn xy_yx_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	xy_yx_family(params,router,flit,in_channel,outputs,inject,rng,false);
}

///As `xy_yx_mesh` but the order is chosen by comparing the used credit of the
///two first hops, drawing at random on ties.
pub fn adaptive_xy_yx_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	xy_yx_family(params,router,flit,in_channel,outputs,inject,rng,true);
}

///A random node inside the minimal quadrant spanned by source and destination.
fn random_intermediate(params:&RoutingParams, src:usize, dest:usize, rng:&mut StdRng) -> usize
{
	let src_coordinates=params.cartesian.unpack(src);
	let dest_coordinates=params.cartesian.unpack(dest);
	let mut intermediate=Vec::with_capacity(src_coordinates.len());
	for (&cs,&cd) in src_coordinates.iter().zip(dest_coordinates.iter())
	{
		let low=cs.min(cd);
		let high=cs.max(cd);
		intermediate.push(low+random_int(rng,high-low));
	}
	params.cartesian.pack(&intermediate)
}

fn two_phase_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng, minimal_quadrant:bool)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	if in_channel==2*n
	{
		let intermediate=if minimal_quadrant
		{
			random_intermediate(params,flit.src,flit.dest,rng)
		}
		else
		{
			random_int(rng,params.num_nodes()-1)
		};
		flit.scratch=RoutingScratch::TwoPhase{
			intermediate,
			phase: RoutingPhase::ToIntermediate,
		};
	}
	let (intermediate,mut phase)=match flit.scratch
	{
		RoutingScratch::TwoPhase{intermediate,phase} => (intermediate,phase),
		ref other => panic!("two-phase mesh routing found the scratch state {:?}",other),
	};
	if phase==RoutingPhase::ToIntermediate && cur==intermediate
	{
		phase=RoutingPhase::ToDestination;
		flit.scratch=RoutingScratch::TwoPhase{intermediate,phase};
	}
	let out_port=match phase
	{
		RoutingPhase::ToIntermediate => dor_next_mesh(params,cur,intermediate,false),
		RoutingPhase::ToDestination => dor_next_mesh(params,cur,flit.dest,false),
	};
	//the phases need separate channel halves, except at the endpoints of the route
	let endpoint=if minimal_quadrant
	{
		cur==flit.src || cur==flit.dest
	}
	else
	{
		cur==flit.dest
	};
	if !endpoint
	{
		let available_vcs=(vc_end-vc_begin+1)/2;
		assert!(available_vcs>0,"two-phase routing needs at least two virtual channels in range [{},{}]",vc_begin,vc_end);
		match phase
		{
			RoutingPhase::ToIntermediate => vc_end-=available_vcs,
			RoutingPhase::ToDestination => vc_begin+=available_vcs,
		}
	}
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///Randomized minimal routing: a random intermediate inside the bounding box of
///source and destination, then dimension order on both legs.
pub fn romm_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	two_phase_mesh(params,router,flit,in_channel,outputs,inject,rng,true);
}

///The Valiant scheme on a mesh: a uniformly random intermediate node, then
///dimension order on both legs.
pub fn valiant_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	two_phase_mesh(params,router,flit,in_channel,outputs,inject,rng,false);
}

fn valiant_torus_family(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng, node_identified:bool)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	if node_identified && (inject || router.get_index()!=flit.dest)
	{
		destination_slice(params,flit.dest,&mut vc_begin,&mut vc_end);
	}
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	let mut in_channel=in_channel;
	if in_channel==2*n
	{
		flit.scratch=RoutingScratch::TorusRing{
			phase: RoutingPhase::ToIntermediate,
			partition: 0,
			intermediate: Some(random_int(rng,params.num_nodes()-1)),
		};
	}
	let (mut phase,mut partition,intermediate)=match flit.scratch
	{
		RoutingScratch::TorusRing{phase,partition,intermediate:Some(intermediate)} => (phase,partition,intermediate),
		ref other => panic!("valiant torus routing found the scratch state {:?}",other),
	};
	if phase==RoutingPhase::ToIntermediate && cur==intermediate
	{
		phase=RoutingPhase::ToDestination;
		//so the ring direction is chosen afresh for the second leg
		in_channel=2*n;
	}
	let target=match phase
	{
		RoutingPhase::ToIntermediate => intermediate,
		RoutingPhase::ToDestination => flit.dest,
	};
	let out_port=dor_next_torus(params,cur,target,in_channel,&mut partition,false,rng);
	flit.scratch=RoutingScratch::TorusRing{
		phase,
		partition,
		intermediate: Some(intermediate),
	};
	if cur!=flit.dest && !node_identified
	{
		//phase halves first, then the ring partition within each half
		let phase_vcs=(vc_end-vc_begin+1)/2;
		assert!(phase_vcs>0,"two-phase ring routing needs at least four virtual channels in range [{},{}]",vc_begin,vc_end);
		match phase
		{
			RoutingPhase::ToIntermediate => vc_end-=phase_vcs,
			RoutingPhase::ToDestination => vc_begin+=phase_vcs,
		}
		let ring_vcs=(vc_end-vc_begin+1)/2;
		assert!(ring_vcs>0,"two-phase ring routing needs at least four virtual channels per class");
		if partition==0
		{
			vc_end-=ring_vcs;
		}
		else
		{
			vc_begin+=ring_vcs;
		}
	}
	outputs.add_range(out_port,vc_begin,vc_end,0);
}

///The Valiant scheme on a torus. The class range is split in four: a half per
///phase, a dateline partition half within each.
pub fn valiant_torus(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	valiant_torus_family(params,router,flit,in_channel,outputs,inject,rng,false);
}

///The Valiant scheme over node-identified channels: the destination slice
///already separates the traffic, so the phase and partition keep no channels of
///their own. The partition is still tracked in the flit for the ring decisions.
pub fn valiant_ni_torus(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	valiant_torus_family(params,router,flit,in_channel,outputs,inject,rng,true);
}

///Minimal adaptive routing: a dimension-ordered escape path on the lowest
///channel of the class, any productive direction on the remaining channels.
pub fn min_adapt_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	if cur==flit.dest
	{
		outputs.add_range(2*n,vc_begin,vc_end,0);
		return;
	}
	//the escape check ignores the injection channel
	let in_vc=if in_channel==2*n { vc_end } else { flit.vc.expect("a flit in transit must carry its virtual channel") };
	//escape path at the lowest channel, dimension-ordered, high priority
	let escape_port=dor_next_mesh(params,cur,flit.dest,false);
	outputs.add_range(escape_port,vc_begin,vc_begin,0);
	if flit.watch
	{
		eprintln!("{} | flit {} | escape port {} plus adaptive candidates",router.full_name(),flit.id,escape_port);
	}
	if in_vc!=vc_begin
	{
		assert!(vc_end>vc_begin,"minimal adaptive routing needs at least two virtual channels in range [{},{}]",vc_begin,vc_end);
		let cur_coordinates=params.cartesian.unpack(cur);
		let dest_coordinates=params.cartesian.unpack(flit.dest);
		for dim in 0..n
		{
			if cur_coordinates[dim]<dest_coordinates[dim]
			{
				outputs.add_range(2*dim,vc_begin+1,vc_end,1);
			}
			else if cur_coordinates[dim]>dest_coordinates[dim]
			{
				outputs.add_range(2*dim+1,vc_begin+1,vc_end,1);
			}
		}
	}
}

///Planar adaptive routing: adaptivity restricted to one plane at a time, with
///the class range split in thirds and fault-aware misrouting in the second
///dimension of the plane.
pub fn planar_adapt_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, in_channel:usize, outputs:&mut OutputSet, inject:bool, rng:&mut StdRng)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	if cur==flit.dest
	{
		outputs.add_range(2*n,vc_begin,vc_end,0);
		return;
	}
	let in_vc=if in_channel==2*n { vc_end } else { flit.vc.expect("a flit in transit must carry its virtual channel") };
	let vc_mult=(vc_end-vc_begin+1)/3;
	assert!(vc_mult>0,"planar adaptive routing needs at least three virtual channels in range [{},{}]",vc_begin,vc_end);
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(flit.dest);
	//Find the first unmatched dimension, except when we are back in the first
	//dimension because of a misroute in the last adaptive plane.
	let mut plane=None;
	for dim in 0..n
	{
		if cur_coordinates[dim]!=dest_coordinates[dim]
			&& !(in_channel/2==0 && dim==0 && in_vc<vc_begin+2*vc_mult)
		{
			plane=Some(dim);
			break;
		}
	}
	let plane=plane.expect("no adaptive plane found for an undelivered flit");
	if flit.watch
	{
		eprintln!("{} | flit {} | planar adaptive in plane {}",router.full_name(),flit.id,plane);
	}
	//The productive move in the plane itself rides the upper third.
	let increase=cur_coordinates[plane]<dest_coordinates[plane];
	let productive_port=if increase { 2*plane } else { 2*plane+1 };
	let fault=router.is_faulty_output(productive_port);
	if !fault
	{
		outputs.add_range(productive_port,vc_begin+2*vc_mult,vc_end,0);
	}
	//The second dimension of the plane rides the lower or middle third.
	let next=(plane+1)%n;
	let (vc_begin,vc_end)=if increase
	{
		(vc_begin,vc_begin+vc_mult-1)
	}
	else
	{
		(vc_begin+vc_mult,vc_begin+2*vc_mult-1)
	};
	let mut second: Option<usize> = if cur_coordinates[next]<dest_coordinates[next]
	{
		Some(2*next)
	}
	else if cur_coordinates[next]>dest_coordinates[next]
	{
		Some(2*next+1)
	}
	else
	{
		None
	};
	//Avoid the 180 degree turn unless the fault forces the misroute back.
	if second==Some(in_channel)
	{
		second=if fault { Some(in_channel^1) } else { None };
	}
	match second
	{
		Some(port) =>
		{
			if !router.is_faulty_output(port)
			{
				outputs.add_range(port,vc_begin,vc_end,0);
			}
			else if fault
			{
				eprintln!("{} | flit {} | faulty outputs in both dimensions of plane {}",router.full_name(),flit.id,plane);
				//back-turn so the flit keeps an output and the simulation can progress
				let back=if in_channel<2*n { in_channel^1 } else { port };
				outputs.add_range(back,vc_begin,vc_end,0);
			}
		},
		None if fault =>
		{
			//The plane is blocked and the second dimension is aligned: misroute.
			let side=params.cartesian.sides[next];
			let (port,at_edge)=if cur_coordinates[next]==0
			{
				(2*next,true)
			}
			else if cur_coordinates[next]==side-1
			{
				(2*next+1,true)
			}
			else
			{
				let mut port=2*next+random_int(rng,1);
				if port==in_channel
				{
					port=in_channel^1;
				}
				(port,false)
			};
			if !router.is_faulty_output(port)
			{
				outputs.add_range(port,vc_begin,vc_end,0);
			}
			else if !at_edge && !router.is_faulty_output(port^1)
			{
				outputs.add_range(port^1,vc_begin,vc_end,0);
			}
			else
			{
				eprintln!("{} | flit {} | faulty outputs in both dimensions of plane {}",router.full_name(),flit.id,plane);
				outputs.add_range(port,vc_begin,vc_end,0);
			}
		},
		None => (),
	}
}

///Chaos routing on a mesh: every minimal direction, riding the first channel
///of the flit's class.
pub fn chaos_mesh(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,_vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_begin);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	if cur==flit.dest
	{
		outputs.add_range(2*n,vc_begin,vc_begin,0);
		return;
	}
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(flit.dest);
	for dim in 0..n
	{
		if cur_coordinates[dim]<dest_coordinates[dim]
		{
			outputs.add_range(2*dim,vc_begin,vc_begin,0);
		}
		else if cur_coordinates[dim]>dest_coordinates[dim]
		{
			outputs.add_range(2*dim+1,vc_begin,vc_begin,0);
		}
	}
}

///Chaos routing on a torus: the shorter way (or both, on ties) around every
///mismatched ring, riding the first channel of the flit's class.
pub fn chaos_torus(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,_vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_begin);
		return;
	}
	let n=params.num_dims();
	let cur=router.get_index();
	if cur==flit.dest
	{
		outputs.add_range(2*n,vc_begin,vc_begin,0);
		return;
	}
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(flit.dest);
	for dim in 0..n
	{
		if cur_coordinates[dim]!=dest_coordinates[dim]
		{
			let side=params.cartesian.sides[dim] as i64;
			let c=cur_coordinates[dim] as i64;
			let d=dest_coordinates[dim] as i64;
			let dist2=side-2*((d-c+side)%side);
			if dist2>=0
			{
				outputs.add_range(2*dim,vc_begin,vc_begin,0);
			}
			if dist2<=0
			{
				outputs.add_range(2*dim+1,vc_begin,vc_begin,0);
			}
		}
	}
}
