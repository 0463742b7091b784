/*!

The `UniTorus` network: a unidirectional torus in every dimension, except that
the vertical dimension may instead be a bidirectional mesh of per-node up/down
links. The builder creates one router per node, wires every channel exactly
once, and finally attaches the injection/ejection channels of the servers.

The network owns the router and channel vectors; routers and channels refer to
each other only through indices, so there is no ownership cycle to break.

*/

use itertools::izip;
use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;

use crate::Channel;
use crate::config::Configuration;
use crate::error::{Error,SourceLocation};
use crate::router::Router;
use crate::routing::RoutingParams;
use crate::topology::{CartesianData,Location,VerticalTopology};
use crate::{error,source_location};

///The built network: routers, channels, and the parameter record the routing
///functions share.
#[derive(Quantifiable)]
#[derive(Debug)]
pub struct UniTorus
{
	params: RoutingParams,
	routers: Vec<Router>,
	channels: Vec<Channel>,
	///How many channels connect routers to routers. The injection/ejection
	///channels of the servers follow them in the channel vector.
	num_inter_router_channels: usize,
}

impl UniTorus
{
	pub fn new(configuration:&Configuration) -> Result<UniTorus,Error>
	{
		let params=RoutingParams::new(configuration)?;
		UniTorus::from_params(params)
	}
	pub fn from_params(params:RoutingParams) -> Result<UniTorus,Error>
	{
		let n=params.num_dims();
		let size=params.num_nodes();
		let vertical_mesh=params.vertical_topology==VerticalTopology::Mesh && n>2;
		let expected_channels=if vertical_mesh
		{
			let sz=params.cartesian.sides[2];
			let nodes_per_layer=params.cartesian.sides[0]*params.cartesian.sides[1];
			(n-1)*size + 2*(sz-1)*nodes_per_layer
		}
		else
		{
			n*size
		};
		if params.debug
		{
			println!("UniTorus dimensions: {} = {} nodes",params.cartesian.sides.iter().map(|side|side.to_string()).collect::<Vec<_>>().join("x"),size);
			for (dim,(side,bandwidth,latency,penalty)) in izip!(&params.cartesian.sides,&params.dim_bandwidth,&params.dim_latency,&params.dim_penalty).enumerate()
			{
				println!("  Dimension {}: size={}, bandwidth={}, latency={}, penalty={}",dim,side,bandwidth,latency,penalty);
			}
			println!("Total inter-router channels for {} mode: {}",if vertical_mesh {"mesh"} else {"torus"},expected_channels);
		}
		let mut routers=Vec::with_capacity(size);
		for node in 0..size
		{
			let coordinates=params.cartesian.unpack(node);
			let mut name="router".to_string();
			for c in coordinates.iter()
			{
				name.push_str(&format!("_{}",c));
			}
			//One port per dimension, except that the vertical dimension under mesh
			//contributes a Z-up port below the top layer and a Z-down port above the bottom one.
			let mut net_ports=n;
			if vertical_mesh
			{
				net_ports-=1;
				if coordinates[2]<params.cartesian.sides[2]-1
				{
					net_ports+=1;
				}
				if coordinates[2]>0
				{
					net_ports+=1;
				}
			}
			let total_ports=net_ports+1;//plus the server
			if params.debug
			{
				println!("node {} coords{:?} gets {} ports",node,coordinates,total_ports);
			}
			routers.push(Router::new(node,name,total_ports,total_ports));
		}
		let mut channels:Vec<Channel>=Vec::with_capacity(expected_channels+2*size);
		for node in 0..size
		{
			for dim in 0..n
			{
				if vertical_mesh && dim==2
				{
					let coordinates=params.cartesian.unpack(node);
					let nodes_per_layer=params.cartesian.sides[0]*params.cartesian.sides[1];
					if coordinates[2]<params.cartesian.sides[2]-1
					{
						UniTorus::wire(&mut channels,&mut routers,expected_channels,node,node+nodes_per_layer,params.dim_latency[dim])?;
					}
					if coordinates[2]>0
					{
						UniTorus::wire(&mut channels,&mut routers,expected_channels,node,node-nodes_per_layer,params.dim_latency[dim])?;
					}
				}
				else
				{
					let next=next_node(&params.cartesian,node,dim);
					UniTorus::wire(&mut channels,&mut routers,expected_channels,node,next,params.dim_latency[dim])?;
				}
			}
		}
		if channels.len()!=expected_channels
		{
			return Err(error!(ill_formed_topology).with_message(format!("wired {} inter-router channels but computed {}",channels.len(),expected_channels)));
		}
		let num_inter_router_channels=channels.len();
		for node in 0..size
		{
			//injection channel, from the server into the router
			let channel_index=channels.len();
			let mut channel=Channel::new(1);
			channel.source=Location::ServerPort(node);
			let port=routers[node].add_input_channel(channel_index)?;
			channel.sink=Location::RouterPort{router_index:node,router_port:port};
			channels.push(channel);
			//ejection channel, from the router into the server
			let channel_index=channels.len();
			let mut channel=Channel::new(1);
			channel.sink=Location::ServerPort(node);
			let port=routers[node].add_output_channel(channel_index)?;
			channel.source=Location::RouterPort{router_index:node,router_port:port};
			channels.push(channel);
		}
		for router in routers.iter()
		{
			if router.wired_inputs()!=router.num_inputs() || router.wired_outputs()!=router.num_outputs()
			{
				return Err(error!(ill_formed_topology).with_message(format!("router {} was left with {}/{} inputs and {}/{} outputs wired",router.full_name(),router.wired_inputs(),router.num_inputs(),router.wired_outputs(),router.num_outputs())));
			}
		}
		if params.debug
		{
			for (channel_index,channel) in channels.iter().enumerate()
			{
				if channel.source==Location::None || channel.sink==Location::None
				{
					return Err(error!(ill_formed_topology).with_message(format!("channel {} was not wired on both sides",channel_index)));
				}
			}
			println!("All {} channels allocated successfully",channels.len());
		}
		Ok(UniTorus{
			params,
			routers,
			channels,
			num_inter_router_channels,
		})
	}
	///Create one channel and hand its endpoints to the two routers.
	fn wire(channels:&mut Vec<Channel>, routers:&mut Vec<Router>, expected_channels:usize, from:usize, to:usize, latency:usize) -> Result<(),Error>
	{
		let channel_index=channels.len();
		if channel_index>=expected_channels
		{
			return Err(error!(ill_formed_topology).with_message(format!("channel {} exceeds the {} allocated channels",channel_index,expected_channels)));
		}
		let mut channel=Channel::new(latency);
		let out_port=routers[from].add_output_channel(channel_index)?;
		channel.source=Location::RouterPort{router_index:from,router_port:out_port};
		let in_port=routers[to].add_input_channel(channel_index)?;
		channel.sink=Location::RouterPort{router_index:to,router_port:in_port};
		channels.push(channel);
		Ok(())
	}
	pub fn params(&self) -> &RoutingParams
	{
		&self.params
	}
	pub fn num_routers(&self) -> usize
	{
		self.routers.len()
	}
	pub fn router(&self, index:usize) -> &Router
	{
		&self.routers[index]
	}
	///Mutable access for the host kernel to move credits and inject faults.
	pub fn router_mut(&mut self, index:usize) -> &mut Router
	{
		&mut self.routers[index]
	}
	pub fn routers(&self) -> &[Router]
	{
		&self.routers
	}
	pub fn channels(&self) -> &[Channel]
	{
		&self.channels
	}
	pub fn num_inter_router_channels(&self) -> usize
	{
		self.num_inter_router_channels
	}
	pub fn num_dims(&self) -> usize
	{
		self.params.num_dims()
	}
	pub fn dim_size(&self, dim:usize) -> usize
	{
		self.params.cartesian.sides[dim]
	}
	pub fn dim_sizes(&self) -> &[usize]
	{
		&self.params.cartesian.sides
	}
	pub fn dim_latency(&self, dim:usize) -> usize
	{
		self.params.dim_latency[dim]
	}
	pub fn dim_penalty(&self, dim:usize) -> f64
	{
		self.params.dim_penalty[dim]
	}
	///The wrap successor of a node along a dimension.
	pub fn next_node(&self, node:usize, dim:usize) -> usize
	{
		next_node(&self.params.cartesian,node,dim)
	}
	///Aggregate capacity, the sum of the per-dimension bandwidths.
	pub fn capacity(&self) -> f64
	{
		self.params.dim_bandwidth.iter().map(|&bandwidth|bandwidth as f64).sum()
	}
}

///The wrap successor of a node along a dimension: increment the coordinate modulo its side.
pub fn next_node(cartesian:&CartesianData, node:usize, dim:usize) -> usize
{
	let mut coordinates=cartesian.unpack(node);
	coordinates[dim]=(coordinates[dim]+1)%cartesian.sides[dim];
	cartesian.pack(&coordinates)
}
