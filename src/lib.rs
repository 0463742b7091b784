/*!
ascensor-lib
=====

This crate provides the core of a cycle-level interconnection network simulator:
the routing decision engine and the switch allocator for a 3D topology made of a
unidirectional 2D torus in the X/Y plane plus a configurable vertical dimension.
The vertical dimension is either one more unidirectional ring or a bidirectional
mesh of per-node up/down links; in the latter case packets reach other layers
through designated "elevator" columns.

# Usage

The host simulation kernel builds a [`Configuration`](config/struct.Configuration.html)
with the option pairs, constructs the network, looks its routing function up, and
then drives the per-cycle loop: routing for every head flit, allocation, movement.

```ignore
let configuration = Configuration::from_pairs(&[
	("dim_sizes","{3,3,2}"),
	("vertical_topology","mesh"),
	("elevator_mapping_coords","{0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0}"),
	("routing_function","dim_order_3d_elevator_unitorus"),
	("num_vcs","8"),
]);
let network = UniTorus::new(&configuration)?;
let routing = new_routing_function(configuration.get_str("routing_function").unwrap())?;
let mut rng = StdRng::seed_from_u64(42);
//per cycle: call `routing` for each head flit, feed the requests to a
//`DorAllocator`, apply the grants.
```

# Configuration keys

| Key | Semantics |
|---|---|
| `dim_sizes` | List of positive ints, `{s0,s1,...}`. Required. |
| `dim_bandwidth` | List of positive ints, length N. Default 1. |
| `dim_latency` | List of positive ints, length N. Default 1. |
| `dim_penalty` | List of non-negative reals, length N. Default 0. |
| `vertical_topology` | `torus` or `mesh`. Default `torus`. |
| `elevator_mapping_coords` | Flat list of `2*s0*s1` ints, an `(x,y)` pair per grid cell. |
| `routing_function` | One of the names registered in [`new_routing_function`](routing/fn.new_routing_function.html). |
| `num_vcs` | Positive int. Default 16. |
| `{read,write}_{request,reply}_{begin,end}_vc` | Virtual channel class bounds; negatives select the half-split defaults. |
| `unitorus_debug` | 0/1 diagnostic verbosity. |

List values accept optional surrounding braces and comma separation; an empty
string or a bare `0` selects the defaults.

The simulation kernel itself (time wheel, credit accounting, buffering, traffic
generation, statistics) is not part of this crate. The types here expose
exactly the surface those collaborators consume.

*/

pub use quantifiable_derive::Quantifiable;//the derive macro

pub mod config;
pub mod error;
pub mod quantify;
pub mod topology;
pub mod router;
pub mod routing;
pub mod allocator;

use crate::quantify::Quantifiable;
use crate::routing::RoutingScratch;
use crate::topology::Location;

pub use crate::config::Configuration;
pub use crate::error::Error;
pub use crate::router::Router;
pub use crate::routing::{new_routing_function,OutputSet,RoutingParams};
pub use crate::topology::{UniTorus,VerticalTopology};

///The kinds of traffic a flit can belong to. Each kind owns a virtual channel
///range, so requests can never starve replies of buffer space.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum FlitType
{
	ReadRequest,
	WriteRequest,
	ReadReply,
	WriteReply,
}

///The smallest unit of flow control on a link. Only the head flit of a packet
///reaches the routing functions; the fields here are the ones they consume.
#[derive(Clone,Debug)]
pub struct Flit
{
	pub id: usize,
	///Source node.
	pub src: usize,
	///Destination node.
	pub dest: usize,
	///Virtual channel the flit currently occupies. `None` before injection.
	pub vc: Option<usize>,
	pub flit_type: FlitType,
	///State written by the routing functions and carried between hops.
	pub scratch: RoutingScratch,
	///Whether to print traces for this flit.
	pub watch: bool,
}

impl Flit
{
	pub fn new(id:usize, src:usize, dest:usize, flit_type:FlitType) -> Flit
	{
		Flit{
			id,
			src,
			dest,
			vc: None,
			flit_type,
			scratch: RoutingScratch::Direct,
			watch: false,
		}
	}
}

impl Quantifiable for Flit
{
	fn total_memory(&self) -> usize
	{
		std::mem::size_of::<Flit>()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		std::mem::size_of::<Flit>()
	}
}

///A directional link with a fixed latency. Channels are owned by the network;
///each one is handed to exactly one router as an output endpoint and to exactly
///one router (or server) as an input endpoint.
#[derive(Clone,Debug,Quantifiable)]
pub struct Channel
{
	///Cycles a flit spends traversing the link.
	pub latency: usize,
	///Where flits enter the channel.
	pub source: Location,
	///Where flits leave the channel.
	pub sink: Location,
}

impl Channel
{
	pub fn new(latency:usize) -> Channel
	{
		Channel{
			latency,
			source: Location::None,
			sink: Location::None,
		}
	}
}
