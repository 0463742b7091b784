/*!

An Allocator resolves the per-cycle contention for a router crossbar: each
input port (client) may request output ports (resources), and the allocator
produces a matching in which every client keeps at most one resource and every
resource at most one client.

The dimension-ordered allocator in [`dor`](dor/index.html) is the one the
unidirectional torus uses.

*/

pub mod dor;

use ::rand::rngs::StdRng;

pub use self::dor::DorAllocator;

/// A client (input of the crossbar) wants a resource (output of the crossbar)
/// with a certain priority. Lower priority values are served earlier.
#[derive(Clone,Debug)]
pub struct Request
{
	/// The input of the crossbar.
	pub client: usize,
	/// The output of the crossbar.
	pub resource: usize,
	/// The priority of the request (None if not specified).
	pub priority: Option<usize>,
}

impl Request
{
	pub fn new(client:usize, resource:usize, priority:Option<usize>) -> Request
	{
		Request{
			client,
			resource,
			priority,
		}
	}
}

/// A collection of granted requests.
#[derive(Default)]
pub struct GrantedRequests
{
	granted_requests: Vec<Request>,
}

impl GrantedRequests
{
	fn add_granted_request(&mut self, request:Request)
	{
		self.granted_requests.push(request);
	}
	pub fn len(&self) -> usize
	{
		self.granted_requests.len()
	}
	pub fn is_empty(&self) -> bool
	{
		self.granted_requests.is_empty()
	}
}

impl IntoIterator for GrantedRequests
{
	type Item = Request;
	type IntoIter = <Vec<Request> as IntoIterator>::IntoIter;
	fn into_iter(self) -> <Self as IntoIterator>::IntoIter
	{
		self.granted_requests.into_iter()
	}
}

/**
An Allocator manages the requests from a set of clients to a set of resources.
Requests are added via `add_request`. When all the requests of the cycle have
been made, a call to `perform_allocation` returns a valid, possibly partial,
allocation; the request state is then cleared, while any arbitration state (such
as round-robin pointers) persists into the next cycle.

unrelated to `std::alloc::Allocator`.
**/
pub trait Allocator
{
	/// Add a new request to the allocator.
	/// (It assumes that the request is not already in the allocator)
	fn add_request(&mut self, request:Request);

	/// Returns the granted requests and clears the pending ones.
	/// The random number generator is available for allocators that randomize.
	fn perform_allocation(&mut self, rng:&mut StdRng) -> GrantedRequests;

	/// Whether the allocator gives more priority to requests coming from another
	/// router than to those coming from a server.
	fn support_intransit_priority(&self) -> bool;
}
