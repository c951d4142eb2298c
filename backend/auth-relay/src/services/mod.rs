pub mod onboarding;

pub use onboarding::*;
