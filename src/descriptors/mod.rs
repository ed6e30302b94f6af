pub mod profiles;
pub mod registry;
pub mod transitions;

pub use profiles::{KeyProfile, HALF_LEN, PROFILE_LEN};
pub use registry::{ProfileRegistry, Registry, TransitionRegistry};
pub use transitions::{KeyTransition, TransitionKind, RATIO_INDEX, TRANSITION_LEN};
