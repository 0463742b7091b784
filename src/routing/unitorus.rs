/*!

Routing functions for the unidirectional torus built by
[`UniTorus`](../../topology/unitorus/struct.UniTorus.html).

Here the port layout is one output per dimension: port 0 is X, port 1 is Y and
so on, with the server ejection last. Under a mesh vertical topology the Z
dimension contributes a Z-up port and a Z-down port instead; when both are
present they sit at ports 2 and 3, when the router is at the top or bottom
layer its single vertical port sits at port 2.

X and Y are unidirectional, so a destination "behind" the current node is
reached by going the rest of the way around the ring.

*/

use ::rand::rngs::StdRng;

use crate::Flit;
use crate::router::Router;
use crate::routing::{class_vc_bounds,OutputSet,RoutingParams};

/**Cost-weighted dimension-ordered routing for the unidirectional torus.

Every mismatched dimension is costed as `distance + penalty - (bandwidth-1)`,
with the forward ring distance, and the cheapest dimension is traversed next;
on ties the lowest dimension wins. The class range is split at the ring
dateline: a hop that does not wrap uses the lower half, a wrapping one the
upper half.
**/
pub fn dim_order_unitorus(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (mut vc_begin,mut vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	let cur=router.get_index();
	let dest=flit.dest;
	if cur==dest
	{
		outputs.add_range(router.num_outputs()-1,vc_begin,vc_end,0);
		return;
	}
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(dest);
	let mut best: Option<(usize,f64)> = None;
	for dim in 0..params.num_dims()
	{
		if cur_coordinates[dim]==dest_coordinates[dim]
		{
			continue;
		}
		let side=params.cartesian.sides[dim];
		let distance=(dest_coordinates[dim]+side-cur_coordinates[dim])%side;
		let cost=distance as f64 + params.dim_penalty[dim] - (params.dim_bandwidth[dim] as f64 - 1.0);
		//first dimension wins on cost ties
		if best.map_or(true,|(_,best_cost)|cost<best_cost)
		{
			best=Some((dim,cost));
		}
	}
	let (dim,cost)=best.expect("some dimension must mismatch when cur!=dest");
	if params.debug
	{
		println!("{} | flit {} | dimension {} with cost {} toward {}",router.full_name(),flit.id,dim,cost,dest);
	}
	//Dateline split: hops that stay below the wrap point use the lower half of
	//the class range, wrapping hops the upper half.
	if cur_coordinates[dim]<dest_coordinates[dim]
	{
		vc_end=vc_begin+(vc_end-vc_begin)/2;
	}
	else
	{
		vc_begin+=(vc_end-vc_begin+1)/2;
	}
	outputs.add_range(dim,vc_begin,vc_end,0);
}

/**The 3D elevator router.

A flit on the wrong layer first crosses the X/Y plane toward the elevator
column assigned to its current cell, rides the vertical dimension there, and
finally crosses the plane again toward the destination. Plane traversals are
X-first dimension order, always in the positive ring direction. The virtual
channel range is left unrestricted.
**/
pub fn dim_order_3d_elevator_unitorus(params:&RoutingParams, router:&Router, flit:&mut Flit, _in_channel:usize, outputs:&mut OutputSet, inject:bool, _rng:&mut StdRng)
{
	let (vc_begin,vc_end)=class_vc_bounds(params,flit,inject);
	outputs.clear();
	if inject
	{
		outputs.add_injection_range(vc_begin,vc_end);
		return;
	}
	assert_eq!(params.num_dims(),3,"the elevator router works on three dimensions");
	assert!(!params.elevator_map.is_empty(),"the elevator router needs an elevator map");
	let cur=router.get_index();
	let dest=flit.dest;
	if cur==dest
	{
		outputs.add_range(router.num_outputs()-1,vc_begin,vc_end,0);
		return;
	}
	let cur_coordinates=params.cartesian.unpack(cur);
	let dest_coordinates=params.cartesian.unpack(dest);
	let (cx,cy,cz)=(cur_coordinates[0],cur_coordinates[1],cur_coordinates[2]);
	let (dx,dy,dz)=(dest_coordinates[0],dest_coordinates[1],dest_coordinates[2]);
	let out_port=if cz==dz
	{
		//same layer: X-first dimension order toward the destination
		if cx!=dx { 0 } else { 1 }
	}
	else
	{
		let (ex,ey)=params.nearest_elevator(cx,cy);
		if (cx,cy)==(ex,ey)
		{
			//at the elevator column: ride the vertical dimension
			if router.num_outputs()==5
			{
				//both vertical ports are present
				if cz<dz { 2 } else { 3 }
			}
			else
			{
				//top and bottom layers keep their single vertical port at 2,
				//as does the whole network under a vertical torus
				2
			}
		}
		else if cx!=ex
		{
			0
		}
		else
		{
			1
		}
	};
	if flit.watch
	{
		eprintln!("{} | flit {} | elevator hop through port {} toward destination {}",router.full_name(),flit.id,out_port,dest);
	}
	assert!(out_port<router.num_outputs(),"port {} out of the {} outputs of {}",out_port,router.num_outputs(),router.full_name());
	outputs.add_range(out_port,vc_begin,vc_end,0);
}
