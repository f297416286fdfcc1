mod expander;
mod lookup;

pub use expander::PathExpander;
pub use lookup::find_executable;
