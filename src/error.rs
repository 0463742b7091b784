/*!

This module is for managing errors in the code of ascensor-lib. To avoid invoking `panic!` in favor of a more graceful exit. Cases that should never happen can be kept as `panic!`.

Instead of `expect` or `unwrap_or_else` try
* `map_err` like in `.map_err(|_e|error!(ill_formed_configuration,"num_vcs".to_string()))?;`
* `ok_or_else` like in `.ok_or_else( ||error!(undetermined) )?;`

To include arbitrary messages use the `with_message` method, like as `error!(ill_formed_topology).with_message(format!("A text like in a panic: {}",thing_to_dump))`.

When displaying errors
* Write to the standard error instead of to the standard output. I.e., with `eprintln!` instead of `println!`.
* If you need to exit the application you may use `std::process::exit` instead of `panic!`.

*/

use std::fmt::{Display,Formatter};

/// The main Error class to be used in each `Result(Whatever,Error)`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// A configuration key is missing, malformed, or inconsistent with the rest.
	/// Keep the offending key. There should be an attached message with further explanation.
	IllFormedConfiguration{
		key: String,
	},
	/// The topology builder found an impossible wiring: a channel index beyond the
	/// computed total, a router out of ports, or a router left with missing connections.
	IllFormedTopology,
	/// A routing function was requested by a name that has not been registered.
	UnknownRoutingFunction{
		name: String,
	},
	/// Some method received a bad argument. There should be an attached message with further explanation.
	BadArgument,
	/// Any other error. Better to add new types than to use this thing.
	Undetermined,
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}
#[macro_export]
macro_rules! error{
	($kind:ident,$($args:tt)*) => {{
		Error::$kind( source_location!(), $($args)* )
	}};
	($kind:ident) => {{
		Error::$kind( source_location!() )
	}};
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message:None,
		}
	}
	pub fn with_message(mut self,message:String) -> Error
	{
		match self.message
		{
			Some(ref mut text) => *text += &message,
			None => self.message=Some(message),
		}
		self
	}
	/// example call: `error!(ill_formed_configuration,"dim_sizes".to_string())`.
	pub fn ill_formed_configuration(source_location:SourceLocation,key:String)->Error
	{
		Error{
			source_location,
			kind: IllFormedConfiguration{
				key,
			},
			message:None,
		}
	}
	pub fn ill_formed_topology(source_location:SourceLocation)->Error
	{
		Error{
			source_location,
			kind: IllFormedTopology,
			message:None,
		}
	}
	pub fn unknown_routing_function(source_location:SourceLocation,name:String)->Error
	{
		Error{
			source_location,
			kind: UnknownRoutingFunction{
				name,
			},
			message:None,
		}
	}
	pub fn bad_argument(source_location:SourceLocation)->Error
	{
		Error{
			source_location,
			kind: BadArgument,
			message:None,
		}
	}
	pub fn undetermined(source_location:SourceLocation)->Error
	{
		Error{
			source_location,
			kind: Undetermined,
			message:None,
		}
	}
}


impl Display for Error
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), std::fmt::Error>
	{
		let Error{source_location:location,kind,message} = self;
		writeln!(formatter,"Error at file {} at line {} column {}.",location.file,location.line,location.column)?;
		if let Some(text) = message
		{
			writeln!(formatter,"{}",text)?;
		}
		kind.fmt(formatter)?;
		Ok(())
	}
}

impl Display for ErrorKind
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), std::fmt::Error>
	{
		match self
		{
			IllFormedConfiguration{key} =>
			{
				writeln!(formatter,"IllFormedConfiguration error: the configuration key `{}` could not be interpreted.",key)?;
			},
			IllFormedTopology =>
			{
				writeln!(formatter,"IllFormedTopology error: the network could not be wired consistently.")?;
			},
			UnknownRoutingFunction{name} =>
			{
				writeln!(formatter,"UnknownRoutingFunction error: no routing function has been registered under the name `{}`.",name)?;
			},
			BadArgument =>
			{
				writeln!(formatter,"BadArgument: Bad arguments given to a function.")?;
			},
			Undetermined =>
			{
				writeln!(formatter,"Undetermined error: A generic error. The concrete error should be more specified.")?;
			},
		}
		Ok(())
	}
}
