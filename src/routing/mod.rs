/*!

A routing function decides, at each router and for each head flit, the output
ports and virtual channel ranges the flit may request.

see [`new_routing_function`](fn.new_routing_function.html) for the table of predefined names.

All functions share the signature
`fn(&RoutingParams, &Router, &mut Flit, in_channel, &mut OutputSet, inject, &mut StdRng)`.
They are pure with respect to the router and the global parameters; the only
thing they may write is the flit scratch state (and, on injection, nothing at
all beyond it). Every decision that needs randomness draws it from the given
generator, so a fixed seed reproduces a whole simulation.

*/

///Contains the dimension-ordered primitives and the classical mesh/torus variants.
pub mod cartesian;
///Contains the unidirectional-torus cost DOR and the 3D elevator router.
pub mod unitorus;
///Contains the destination-tag butterfly and the tree NCA family.
pub mod multistage;

use ::rand::{Rng,rngs::StdRng};
use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;

use crate::{Flit,FlitType};
use crate::config::{Configuration,parse_i64_list,parse_f64_list};
use crate::error::{Error,SourceLocation};
use crate::router::Router;
use crate::topology::{CartesianData,VerticalTopology};
use crate::{error,source_location};

pub use self::cartesian::{dor_next_mesh,dor_next_torus};

///Process-wide routing parameters. Built once from the configuration at startup
///and read-only afterwards; every routing function receives a shared reference.
#[derive(Quantifiable)]
#[derive(Debug,Clone)]
pub struct RoutingParams
{
	///The node space: per-dimension sizes, dimension 0 least significant.
	pub cartesian: CartesianData,
	///Link bandwidth per dimension. Lowers the cost of a dimension in the cost-weighted routing.
	pub dim_bandwidth: Vec<usize>,
	///Channel latency per dimension.
	pub dim_latency: Vec<usize>,
	///Extra cost charged to a dimension in the cost-weighted routing.
	pub dim_penalty: Vec<f64>,
	pub vertical_topology: VerticalTopology,
	///Nearest elevator column `(x,y)` per grid cell, indexed `y*s0+x`. Empty when not configured.
	pub elevator_map: Vec<(usize,usize)>,
	pub num_vcs: usize,
	///Virtual channel `(begin,end)` per traffic class, in `FlitType` order.
	pub class_vc_ranges: Vec<(usize,usize)>,
	///Print diagnostics while building and routing.
	pub debug: bool,
}

impl RoutingParams
{
	pub fn new(configuration:&Configuration) -> Result<RoutingParams,Error>
	{
		let sizes_text=configuration.get_str("dim_sizes").ok_or_else(||
			error!(ill_formed_configuration,"dim_sizes".to_string()).with_message("dim_sizes must be specified as comma-separated values (e.g., dim_sizes = {4,6,8})".to_string())
		)?;
		let sizes=parse_i64_list(sizes_text,"dim_sizes")?.ok_or_else(||
			error!(ill_formed_configuration,"dim_sizes".to_string()).with_message("dim_sizes must be specified as comma-separated values (e.g., dim_sizes = {4,6,8})".to_string())
		)?;
		if sizes.is_empty() || sizes.iter().any(|&size|size<=0)
		{
			return Err(error!(ill_formed_configuration,"dim_sizes".to_string()).with_message(format!("all dimension sizes must be positive integers, got {:?}",sizes)));
		}
		let dim_sizes:Vec<usize>=sizes.iter().map(|&size|size as usize).collect();
		let n=dim_sizes.len();
		let positive_list=|key:&str| -> Result<Option<Vec<usize>>,Error>
		{
			let text=match configuration.get_str(key)
			{
				None => return Ok(None),
				Some(text) => text,
			};
			let values=match parse_i64_list(text,key)?
			{
				None => return Ok(None),
				Some(values) => values,
			};
			if values.len()!=n
			{
				return Err(error!(ill_formed_configuration,key.to_string()).with_message(format!("{} has {} values but the topology has {} dimensions",key,values.len(),n)));
			}
			if values.iter().any(|&value|value<=0)
			{
				return Err(error!(ill_formed_configuration,key.to_string()).with_message(format!("all values in {} must be positive integers",key)));
			}
			Ok(Some(values.iter().map(|&value|value as usize).collect()))
		};
		let dim_bandwidth=positive_list("dim_bandwidth")?.unwrap_or_else(||vec![1;n]);
		let dim_latency=positive_list("dim_latency")?.unwrap_or_else(||vec![1;n]);
		let dim_penalty=match configuration.get_str("dim_penalty")
		{
			None => vec![0f64;n],
			Some(text) => match parse_f64_list(text,"dim_penalty")?
			{
				None => vec![0f64;n],
				Some(values) =>
				{
					if values.len()!=n
					{
						return Err(error!(ill_formed_configuration,"dim_penalty".to_string()).with_message(format!("dim_penalty has {} values but the topology has {} dimensions",values.len(),n)));
					}
					if values.iter().any(|&value|value<0f64)
					{
						return Err(error!(ill_formed_configuration,"dim_penalty".to_string()).with_message("all values in dim_penalty must be non-negative numbers".to_string()));
					}
					values
				},
			},
		};
		let vertical_topology=match configuration.get_str("vertical_topology")
		{
			None | Some("torus") => VerticalTopology::Torus,
			Some("mesh") => VerticalTopology::Mesh,
			Some(other) => return Err(error!(ill_formed_configuration,"vertical_topology".to_string()).with_message(format!("vertical_topology must be `torus` or `mesh`, got `{}`",other))),
		};
		let cartesian=CartesianData::new(&dim_sizes);
		let elevator_map=match configuration.get_str("elevator_mapping_coords")
		{
			None => vec![],
			Some(text) => match parse_i64_list(text,"elevator_mapping_coords")?
			{
				None => vec![],
				Some(coords) => Self::build_elevator_map(&cartesian,&coords)?,
			},
		};
		let num_vcs=match configuration.get_i64("num_vcs")?
		{
			None => 16,
			Some(value) =>
			{
				if value<=0
				{
					return Err(error!(ill_formed_configuration,"num_vcs".to_string()).with_message(format!("num_vcs must be positive, got {}",value)));
				}
				value as usize
			},
		};
		let class_keys=["read_request","write_request","read_reply","write_reply"];
		let mut class_vc_ranges=Vec::with_capacity(class_keys.len());
		for (class_index,class) in class_keys.iter().enumerate()
		{
			let is_request=class_index<2;
			//With a single virtual channel both requests and replies share it.
			let (default_begin,default_end)=if num_vcs<2
			{
				(0,num_vcs-1)
			}
			else if is_request
			{
				(0,num_vcs/2-1)
			}
			else
			{
				(num_vcs/2,num_vcs-1)
			};
			let begin_key=format!("{}_begin_vc",class);
			let end_key=format!("{}_end_vc",class);
			let begin=match configuration.get_i64(&begin_key)?
			{
				Some(value) if value>=0 => value as usize,
				_ => default_begin,
			};
			let end=match configuration.get_i64(&end_key)?
			{
				Some(value) if value>=0 => value as usize,
				_ => default_end,
			};
			if begin>end || end>=num_vcs
			{
				return Err(error!(ill_formed_configuration,begin_key).with_message(format!("virtual channel range [{},{}] of class {} is not within the {} available channels",begin,end,class,num_vcs)));
			}
			class_vc_ranges.push((begin,end));
		}
		let debug=configuration.get_i64("unitorus_debug")?.unwrap_or(0)!=0;
		Ok(RoutingParams{
			cartesian,
			dim_bandwidth,
			dim_latency,
			dim_penalty,
			vertical_topology,
			elevator_map,
			num_vcs,
			class_vc_ranges,
			debug,
		})
	}
	fn build_elevator_map(cartesian:&CartesianData, coords:&[i64]) -> Result<Vec<(usize,usize)>,Error>
	{
		if cartesian.sides.len()<2
		{
			return Err(error!(ill_formed_configuration,"elevator_mapping_coords".to_string()).with_message("an elevator map needs at least the X and Y dimensions".to_string()));
		}
		let grid_size=cartesian.sides[0]*cartesian.sides[1];
		if coords.len()!=2*grid_size
		{
			return Err(error!(ill_formed_configuration,"elevator_mapping_coords".to_string()).with_message(format!("coordinate count mismatch: got {} but need {} ({} grid positions, 2 coordinates each)",coords.len(),2*grid_size,grid_size)));
		}
		let mut map=Vec::with_capacity(grid_size);
		for pair in coords.chunks(2)
		{
			let (ex,ey)=(pair[0],pair[1]);
			if ex<0 || ey<0 || ex as usize>=cartesian.sides[0] || ey as usize>=cartesian.sides[1]
			{
				return Err(error!(ill_formed_configuration,"elevator_mapping_coords".to_string()).with_message(format!("elevator ({},{}) is outside the {}x{} grid",ex,ey,cartesian.sides[0],cartesian.sides[1])));
			}
			map.push((ex as usize,ey as usize));
		}
		//An elevator column must be its own nearest elevator.
		for &(ex,ey) in map.iter()
		{
			if map[ey*cartesian.sides[0]+ex]!=(ex,ey)
			{
				return Err(error!(ill_formed_configuration,"elevator_mapping_coords".to_string()).with_message(format!("cell ({},{}) is used as an elevator but maps elsewhere",ex,ey)));
			}
		}
		Ok(map)
	}
	pub fn num_dims(&self) -> usize
	{
		self.cartesian.sides.len()
	}
	pub fn num_nodes(&self) -> usize
	{
		self.cartesian.size
	}
	///The virtual channel `(begin,end)` bounds of a traffic class.
	pub fn class_vc_range(&self, flit_type:FlitType) -> (usize,usize)
	{
		self.class_vc_ranges[flit_type as usize]
	}
	///The nearest elevator column for the grid cell `(x,y)`.
	pub fn nearest_elevator(&self, x:usize, y:usize) -> (usize,usize)
	{
		assert!(!self.elevator_map.is_empty(),"no elevator map has been configured");
		self.elevator_map[y*self.cartesian.sides[0]+x]
	}
}

///Phase of a two-phase randomized route.
#[derive(Clone,Copy,Debug,Quantifiable,PartialEq,Eq)]
pub enum RoutingPhase
{
	ToIntermediate,
	ToDestination,
}

///State a routing function keeps inside the flit between hops.
///Written on injection and at phase transitions, read on every later hop.
#[derive(Clone,Copy,Debug,Quantifiable,PartialEq,Eq)]
pub enum RoutingScratch
{
	///Single phase toward the destination, no ring state.
	Direct,
	///Randomized two-phase routing through an intermediate node.
	TwoPhase{
		intermediate: usize,
		phase: RoutingPhase,
	},
	///Ring traversal with a dateline partition, optionally through an intermediate node.
	TorusRing{
		phase: RoutingPhase,
		partition: usize,
		intermediate: Option<usize>,
	},
}

///A port plus virtual channel interval a flit may request, with a priority for
///the switch allocator. Lower priority values are served first.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct OutputRange
{
	///The requested output port. `None` while the flit still sits at the injection queue.
	pub output_port: Option<usize>,
	pub vc_begin: usize,
	pub vc_end: usize,
	pub priority: i32,
}

///The candidate exits deposited by a routing function for one flit at one router.
#[derive(Clone,Debug,Default)]
pub struct OutputSet
{
	ranges: Vec<OutputRange>,
}

impl OutputSet
{
	pub fn new() -> OutputSet
	{
		OutputSet{
			ranges: vec![],
		}
	}
	pub fn clear(&mut self)
	{
		self.ranges.clear();
	}
	pub fn add_range(&mut self, output_port:usize, vc_begin:usize, vc_end:usize, priority:i32)
	{
		self.ranges.push(OutputRange{
			output_port: Some(output_port),
			vc_begin,
			vc_end,
			priority,
		});
	}
	///Deposit a port-less range: the flit is being injected and only the virtual
	///channel interval is being decided.
	pub fn add_injection_range(&mut self, vc_begin:usize, vc_end:usize)
	{
		self.ranges.push(OutputRange{
			output_port: None,
			vc_begin,
			vc_end,
			priority: 0,
		});
	}
	pub fn ranges(&self) -> &[OutputRange]
	{
		&self.ranges
	}
	pub fn is_empty(&self) -> bool
	{
		self.ranges.is_empty()
	}
}

///The shared signature of every routing function.
pub type RoutingFunction = fn(&RoutingParams, &Router, &mut Flit, usize, &mut OutputSet, bool, &mut StdRng);

/**Look a routing function up by its registered name.

The registered names are

* `dim_order_mesh`, `dim_order_ni_mesh`, `dim_order_pni_mesh`
* `dim_order_torus`, `dim_order_ni_torus`, `dim_order_bal_torus`
* `xy_yx_mesh`, `adaptive_xy_yx_mesh`
* `romm_mesh`, `valiant_mesh`, `valiant_torus`, `valiant_ni_torus`
* `min_adapt_mesh`, `planar_adapt_mesh`
* `chaos_mesh`, `chaos_torus`
* `dest_tag_fly`
* `fattree_nca`, `fattree_anca`, `qtree_nca`, `tree4_nca`, `tree4_anca`
* `dim_order_unitorus`, `dim_order_3d_elevator_unitorus`

An unknown name is a fatal configuration error for the host to report.
**/
pub fn new_routing_function(name:&str) -> Result<RoutingFunction,Error>
{
	let function:RoutingFunction=match name
	{
		"dim_order_mesh" => cartesian::dim_order_mesh,
		"dim_order_ni_mesh" => cartesian::dim_order_ni_mesh,
		"dim_order_pni_mesh" => cartesian::dim_order_pni_mesh,
		"dim_order_torus" => cartesian::dim_order_torus,
		"dim_order_ni_torus" => cartesian::dim_order_ni_torus,
		"dim_order_bal_torus" => cartesian::dim_order_bal_torus,
		"xy_yx_mesh" => cartesian::xy_yx_mesh,
		"adaptive_xy_yx_mesh" => cartesian::adaptive_xy_yx_mesh,
		"romm_mesh" => cartesian::romm_mesh,
		"valiant_mesh" => cartesian::valiant_mesh,
		"valiant_torus" => cartesian::valiant_torus,
		"valiant_ni_torus" => cartesian::valiant_ni_torus,
		"min_adapt_mesh" => cartesian::min_adapt_mesh,
		"planar_adapt_mesh" => cartesian::planar_adapt_mesh,
		"chaos_mesh" => cartesian::chaos_mesh,
		"chaos_torus" => cartesian::chaos_torus,
		"dest_tag_fly" => multistage::dest_tag_fly,
		"fattree_nca" => multistage::fattree_nca,
		"fattree_anca" => multistage::fattree_anca,
		"qtree_nca" => multistage::qtree_nca,
		"tree4_nca" => multistage::tree4_nca,
		"tree4_anca" => multistage::tree4_anca,
		"dim_order_unitorus" => unitorus::dim_order_unitorus,
		"dim_order_3d_elevator_unitorus" => unitorus::dim_order_3d_elevator_unitorus,
		_ => return Err(error!(unknown_routing_function,name.to_string())),
	};
	Ok(function)
}

///Uniform integer in `[0,max]`, both ends included.
///All routing randomness funnels through the generator the host seeds once.
pub fn random_int(rng:&mut StdRng, max:usize) -> usize
{
	rng.gen_range(0..=max)
}

///The common prologue of every routing function: the virtual channel bounds of
///the flit's traffic class. Asserts the flit travels inside its class range, or
///carries no channel yet while being injected.
pub fn class_vc_bounds(params:&RoutingParams, flit:&Flit, inject:bool) -> (usize,usize)
{
	let (vc_begin,vc_end)=params.class_vc_range(flit.flit_type);
	match flit.vc
	{
		Some(vc) => assert!(vc_begin<=vc && vc<=vc_end,"flit {} travels on virtual channel {} outside its class range [{},{}]",flit.id,vc,vc_begin,vc_end),
		None => assert!(inject,"flit {} has no virtual channel but is not being injected",flit.id),
	}
	(vc_begin,vc_end)
}
