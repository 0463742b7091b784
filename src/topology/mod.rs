/*!

The topology module holds the pieces from which the network graph is made: the
coordinate algebra of the Cartesian node space, the endpoint locations channels
connect, and the builder of the unidirectional torus itself.

*/

pub mod unitorus;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::quantify::Quantifiable;

pub use self::unitorus::UniTorus;

///A Cartesian orthohedral region of arbitrary dimension.
///Dimension 0 is the least significant: node `n` has coordinate `i` equal to
///`(n / s_0*...*s_{i-1}) mod s_i`.
#[derive(Quantifiable)]
#[derive(Debug,Clone)]
pub struct CartesianData
{
	pub sides: Vec<usize>,
	pub size: usize,
}

impl CartesianData
{
	pub fn new(sides:&[usize]) -> CartesianData
	{
		CartesianData{
			sides:sides.to_vec(),
			size: sides.iter().product(),
		}
	}
	///From node index to coordinate vector. Fails fast on out-of-range indices.
	pub fn unpack(&self, mut node_index: usize) -> Vec<usize>
	{
		if node_index>=self.size
		{
			panic!("node_index={} is greater than the size of the CartesianData={}",node_index,self.size);
		}
		let mut r=Vec::with_capacity(self.sides.len());
		for side in self.sides.iter()
		{
			r.push(node_index%side);
			node_index/=side;
		}
		r
	}
	///From coordinate vector to node index. Fails fast on out-of-range coordinates.
	pub fn pack(&self, coordinates:&[usize]) -> usize
	{
		//check that the coordinates are within the sides
		for (c,s) in coordinates.iter().zip(self.sides.iter())
		{
			if *c>=*s
			{
				panic!("coordinate {} is greater than the side {}",c,s);
			}
		}
		let mut r=0;
		let mut stride=1;
		for (i,side) in self.sides.iter().enumerate()
		{
			r+=coordinates[i]*stride;
			stride*=side;
		}
		r
	}
}

///A location where a flit can be inserted.
///Channels keep one of these per endpoint instead of holding references into the
///router vector, so the network remains the single owner of both vectors.
#[derive(Clone,Debug,Quantifiable,Hash,Eq,PartialEq)]
pub enum Location
{
	RouterPort{
		router_index: usize,
		router_port: usize,
	},
	ServerPort(usize),
	None,
}

///How the vertical dimension of the network is built.
///`Torus` makes the Z dimension one more unidirectional ring.
///`Mesh` gives each node dedicated up/down links with no wraparound.
#[derive(Clone,Copy,Debug,Quantifiable,PartialEq,Eq)]
pub enum VerticalTopology
{
	Torus,
	Mesh,
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn coordinate_round_trip()
	{
		let data=CartesianData::new(&[3,3,2]);
		assert_eq!(data.size,18);
		for node in 0..data.size
		{
			let coordinates=data.unpack(node);
			assert_eq!(data.pack(&coordinates),node);
		}
		assert_eq!(data.unpack(4),vec![1,1,0]);
		assert_eq!(data.unpack(13),vec![1,1,1]);
	}

	#[test]
	#[should_panic]
	fn pack_rejects_out_of_range()
	{
		let data=CartesianData::new(&[4,4]);
		data.pack(&[4,0]);
	}
}
