/*!

The `Quantifiable` trait allows the host to estimate the memory being employed by the simulation.

Most types just implement `total_memory` and leave the breakdown methods for when someone actually needs them.

*/

use std::mem::{size_of};

///A type whose memory consumption can be estimated.
pub trait Quantifiable
{
	///Get the total memory currently being employed by the implementing type. Both stack and heap.
	fn total_memory(&self) -> usize;
	///Prints by standard output how much memory is used per component.
	fn print_memory_breakdown(&self);
	///Get an estimation on how much memory the type could reach during the simulation.
	fn forecast_total_memory(&self) -> usize;
}

macro_rules! impl_quantifiable_by_size{
	($t:ty) => {
		impl Quantifiable for $t
		{
			fn total_memory(&self) -> usize
			{
				size_of::<$t>()
			}
			fn print_memory_breakdown(&self)
			{
				println!("{}: {} bytes",stringify!($t),size_of::<$t>());
			}
			fn forecast_total_memory(&self) -> usize
			{
				size_of::<$t>()
			}
		}
	}
}

impl_quantifiable_by_size!(usize);
impl_quantifiable_by_size!(u8);
impl_quantifiable_by_size!(u32);
impl_quantifiable_by_size!(u64);
impl_quantifiable_by_size!(i32);
impl_quantifiable_by_size!(i64);
impl_quantifiable_by_size!(f32);
impl_quantifiable_by_size!(f64);
impl_quantifiable_by_size!(bool);

impl Quantifiable for String
{
	fn total_memory(&self) -> usize
	{
		size_of::<String>() + self.capacity()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}

impl<T:Quantifiable> Quantifiable for Vec<T>
{
	fn total_memory(&self) -> usize
	{
		//We cannot know the memory of the skipped elements, so we count the reserved capacity as stack-sized entries.
		size_of::<Vec<T>>() + self.iter().map(|element|element.total_memory()).sum::<usize>() + (self.capacity()-self.len())*size_of::<T>()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}

impl<T:Quantifiable> Quantifiable for Option<T>
{
	fn total_memory(&self) -> usize
	{
		match self
		{
			Some(ref value) => size_of::<Option<T>>() - size_of::<T>() + value.total_memory(),
			None => size_of::<Option<T>>(),
		}
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}

impl<T:Quantifiable> Quantifiable for Box<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Box<T>>() + self.as_ref().total_memory()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}

impl<T:Quantifiable,U:Quantifiable> Quantifiable for (T,U)
{
	fn total_memory(&self) -> usize
	{
		self.0.total_memory() + self.1.total_memory()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}
