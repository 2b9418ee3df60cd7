pub use crate::galaxy::{
    GalaxyRng, LiveGalaxy, ParametersCommitted, RegenerationStatus, GALAXY_SCALE,
    GALAXY_TRANSLATION,
};
pub use crate::graphics::GalaxyPointsMaterial;
pub use galaxy_generator::prelude::*;
