//! Camera state and navigation.

mod navigator;

pub use navigator::{
    CameraNavigator, CameraState, DEFAULT_STEP, LookAtMode, NavigatorPhase, Transition,
};
