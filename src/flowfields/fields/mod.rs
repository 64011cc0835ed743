//! The two passes run over the [crate::prelude::TileGrid] on every change of target: the
//! integration pass works out distances, then the flow pass turns them into directions
//!

pub mod flow_field;
pub mod integration_field;
