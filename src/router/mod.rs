/*!

A `Router` here is only the bookkeeping the routing functions and the switch
allocator consume: port counts, the channels wired to each port, downstream
credit usage, and fault flags on output ports. Buffers, pipelines, and flow
control belong to the host simulation kernel.

*/

use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;

use crate::error::{Error,SourceLocation};
use crate::{error,source_location};

///The per-router state of the network.
///Routers hold channel indices into the vectors owned by the network, never references.
#[derive(Quantifiable)]
#[derive(Debug)]
pub struct Router
{
	///The index of the router in the network.
	index: usize,
	///Name derived from the coordinates, as in `router_0_2_1`.
	name: String,
	num_inputs: usize,
	num_outputs: usize,
	///Channel feeding each input port, in port order. Grows as the builder wires the network.
	input_channels: Vec<usize>,
	///Channel leaving each output port, in port order.
	output_channels: Vec<usize>,
	///Credits currently consumed downstream of each output port. Updated by the host kernel.
	used_credits: Vec<usize>,
	///Output ports marked faulty. Only the fault-aware routings look at this.
	faulty_outputs: Vec<bool>,
}

impl Router
{
	pub fn new(index:usize, name:String, num_inputs:usize, num_outputs:usize) -> Router
	{
		Router{
			index,
			name,
			num_inputs,
			num_outputs,
			input_channels: Vec::with_capacity(num_inputs),
			output_channels: Vec::with_capacity(num_outputs),
			used_credits: vec![0;num_outputs],
			faulty_outputs: vec![false;num_outputs],
		}
	}
	pub fn get_index(&self) -> usize
	{
		self.index
	}
	pub fn num_inputs(&self) -> usize
	{
		self.num_inputs
	}
	pub fn num_outputs(&self) -> usize
	{
		self.num_outputs
	}
	pub fn full_name(&self) -> String
	{
		format!("{} (id {})",self.name,self.index)
	}
	///Wire a channel into the next free input port and return the port index.
	///Gives a topology error when the router is already out of input ports.
	pub fn add_input_channel(&mut self, channel_index:usize) -> Result<usize,Error>
	{
		if self.input_channels.len()>=self.num_inputs
		{
			return Err(error!(ill_formed_topology).with_message(format!("input port overflow on router {}: all {} ports are wired",self.full_name(),self.num_inputs)));
		}
		self.input_channels.push(channel_index);
		Ok(self.input_channels.len()-1)
	}
	///Wire a channel into the next free output port and return the port index.
	pub fn add_output_channel(&mut self, channel_index:usize) -> Result<usize,Error>
	{
		if self.output_channels.len()>=self.num_outputs
		{
			return Err(error!(ill_formed_topology).with_message(format!("output port overflow on router {}: all {} ports are wired",self.full_name(),self.num_outputs)));
		}
		self.output_channels.push(channel_index);
		Ok(self.output_channels.len()-1)
	}
	pub fn input_channel(&self, port:usize) -> usize
	{
		self.input_channels[port]
	}
	pub fn output_channel(&self, port:usize) -> usize
	{
		self.output_channels[port]
	}
	///How many input ports have been wired so far.
	pub fn wired_inputs(&self) -> usize
	{
		self.input_channels.len()
	}
	pub fn wired_outputs(&self) -> usize
	{
		self.output_channels.len()
	}
	///Credits consumed downstream of the given output port.
	pub fn used_credit(&self, port:usize) -> usize
	{
		self.used_credits[port]
	}
	///For the host kernel (and the tests) to move the credit state.
	pub fn set_used_credit(&mut self, port:usize, credits:usize)
	{
		self.used_credits[port]=credits;
	}
	pub fn is_faulty_output(&self, port:usize) -> bool
	{
		self.faulty_outputs[port]
	}
	pub fn set_faulty_output(&mut self, port:usize, faulty:bool)
	{
		self.faulty_outputs[port]=faulty;
	}
}
