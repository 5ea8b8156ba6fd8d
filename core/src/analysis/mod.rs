pub use observation::*;

mod observation;
