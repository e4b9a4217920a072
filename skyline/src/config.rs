// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skyline_comm::{PipeConfig, ThicknessConfig};
use skyline_layout::LayoutConfig;

/// Settings shared by [`CityView`](crate::CityView) and [`LandscapeView`](crate::LandscapeView).
///
/// `Default` carries the reference constants.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ViewConfig {
    /// Thickness of city edges per request-count category.
    pub thickness: ThicknessConfig,
    /// Shape of city pipes.
    pub pipes: PipeConfig,
    /// Landscape sizing and pipeline settings.
    pub layout: LayoutConfig,
}
