pub use crate::galaxy::{
    CommitGalaxyConfig, CommitSystems, GalaxyConfig, GalaxyConfigUi, GalaxyParameters, PointCount,
};
