/*!

A `Configuration` is a read-only snapshot of key/value options. The host front-end is
responsible for reading whatever file format it likes and dumping the pairs here before
the network is built; this module only understands the value syntax.

List values accept optional surrounding braces and comma separation, so `{4,6,8}` and
`4, 6, 8` denote the same list. An empty string or a bare `0` means "use the defaults".

*/

use std::collections::BTreeMap;

use crate::error::{Error,SourceLocation};
use crate::{error,source_location};

///The key/value options the network and the routing parameters are built from.
///Written once by the host at startup and read-only afterwards.
#[derive(Clone,Debug,Default)]
pub struct Configuration
{
	entries: BTreeMap<String,String>,
}

impl Configuration
{
	pub fn new() -> Configuration
	{
		Configuration{
			entries: BTreeMap::new(),
		}
	}
	///Build a configuration from a list of `(key,value)` pairs.
	pub fn from_pairs(pairs:&[(&str,&str)]) -> Configuration
	{
		let mut configuration=Configuration::new();
		for (key,value) in pairs.iter()
		{
			configuration.set(key,value);
		}
		configuration
	}
	///Set a key. Later values overwrite earlier ones.
	pub fn set(&mut self, key:&str, value:&str)
	{
		self.entries.insert(key.to_string(),value.to_string());
	}
	///Get the raw text of a key, if present.
	pub fn get_str(&self, key:&str) -> Option<&str>
	{
		self.entries.get(key).map(|value|value.as_str())
	}
	///Get a key as an integer. Absent keys are `Ok(None)`; text that is not an integer is an error.
	pub fn get_i64(&self, key:&str) -> Result<Option<i64>,Error>
	{
		match self.get_str(key)
		{
			None => Ok(None),
			Some(text) =>
			{
				let value = text.trim().parse::<i64>().map_err(|_|
					error!(ill_formed_configuration,key.to_string()).with_message(format!("`{}` is not an integer",text))
				)?;
				Ok(Some(value))
			},
		}
	}
}

///Split a list value into trimmed tokens, removing optional surrounding braces.
///Returns `None` when the text selects the defaults (empty or a bare `0`).
pub fn list_tokens(text:&str) -> Option<Vec<&str>>
{
	let text=text.trim();
	if text.is_empty() || text=="0"
	{
		return None;
	}
	let text=text.strip_prefix('{').unwrap_or(text);
	let text=text.strip_suffix('}').unwrap_or(text);
	Some(text.split(',').map(|token|token.trim()).filter(|token|!token.is_empty()).collect())
}

///Parse a list value into integers. `Ok(None)` means "use the defaults".
pub fn parse_i64_list(text:&str, key:&str) -> Result<Option<Vec<i64>>,Error>
{
	let tokens=match list_tokens(text)
	{
		None => return Ok(None),
		Some(tokens) => tokens,
	};
	let mut values=Vec::with_capacity(tokens.len());
	for token in tokens
	{
		let value=token.parse::<i64>().map_err(|_|
			error!(ill_formed_configuration,key.to_string()).with_message(format!("`{}` is not an integer",token))
		)?;
		values.push(value);
	}
	Ok(Some(values))
}

///Parse a list value into reals. `Ok(None)` means "use the defaults".
pub fn parse_f64_list(text:&str, key:&str) -> Result<Option<Vec<f64>>,Error>
{
	let tokens=match list_tokens(text)
	{
		None => return Ok(None),
		Some(tokens) => tokens,
	};
	let mut values=Vec::with_capacity(tokens.len());
	for token in tokens
	{
		let value=token.parse::<f64>().map_err(|_|
			error!(ill_formed_configuration,key.to_string()).with_message(format!("`{}` is not a number",token))
		)?;
		values.push(value);
	}
	Ok(Some(values))
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn list_syntax()
	{
		assert_eq!(list_tokens(""),None);
		assert_eq!(list_tokens("0"),None);
		assert_eq!(list_tokens("{4,6,8}"),Some(vec!["4","6","8"]));
		assert_eq!(list_tokens(" 4 , 6 , 8 "),Some(vec!["4","6","8"]));
		assert_eq!(parse_i64_list("{3,3,2}","dim_sizes").unwrap(),Some(vec![3,3,2]));
		assert_eq!(parse_f64_list("{0.5,0,1}","dim_penalty").unwrap(),Some(vec![0.5,0.0,1.0]));
		assert!(parse_i64_list("{3,x}","dim_sizes").is_err());
	}

	#[test]
	fn key_lookup()
	{
		let configuration=Configuration::from_pairs(&[("num_vcs","8"),("vertical_topology","mesh")]);
		assert_eq!(configuration.get_str("vertical_topology"),Some("mesh"));
		assert_eq!(configuration.get_i64("num_vcs").unwrap(),Some(8));
		assert_eq!(configuration.get_i64("unitorus_debug").unwrap(),None);
	}
}
