// Listing Engine
// Turns a raw record collection into the filtered, ordered view the user sees,
// and owns the two mutable bits of per-record state: saved flag and application status.
// Everything here except `handlers` is a pure function over slices.

pub mod filters;
pub mod handlers;
pub mod lifecycle;
pub mod refine;
pub mod search;
pub mod sort;
pub mod suggest;

#[cfg(test)]
pub(crate) mod test_support;
