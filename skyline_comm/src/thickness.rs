// Copyright 2026 the Skyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request-count based thickness classes.

use crate::routing::Routing;

/// Maps a thickness category to a rendered thickness.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ThicknessConfig {
    /// Added per category.
    pub step: f64,
    /// Thickness of category 0.
    pub base: f64,
}

impl ThicknessConfig {
    /// `step = 0.15`, `base = 0.1`.
    pub const DEFAULT: Self = Self {
        step: 0.15,
        base: 0.1,
    };

    /// Rendered thickness of a category.
    #[must_use]
    pub fn thickness(&self, category: u8) -> f64 {
        f64::from(category) * self.step + self.base
    }
}

impl Default for ThicknessConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Category boundaries `[0, min, average, max]` derived from a set of request counts.
///
/// `min` is the smallest positive count (0 when none is positive); `average` and `max` range
/// over every count.
///
/// ```rust
/// use skyline_comm::Categories;
///
/// let categories = Categories::from_requests([0, 10, 2]).unwrap();
/// assert_eq!(categories.bounds(), [0.0, 2.0, 4.0, 10.0]);
/// assert_eq!(categories.category(10), 3);
/// assert_eq!(categories.category(2), 1);
/// assert_eq!(categories.category(0), 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Categories {
    bounds: [f64; 4],
    uniform: bool,
}

impl Categories {
    /// Derives boundaries; `None` for an empty input.
    pub fn from_requests<I>(requests: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut count = 0_u64;
        let mut sum = 0.0;
        let mut max = 0_u64;
        let mut min_positive: Option<u64> = None;
        let mut first: Option<u64> = None;
        let mut uniform = true;
        for value in requests {
            count += 1;
            sum += value as f64;
            max = max.max(value);
            if value > 0 {
                min_positive = Some(min_positive.map_or(value, |m| m.min(value)));
            }
            match first {
                None => first = Some(value),
                Some(first) => uniform &= first == value,
            }
        }
        if count == 0 {
            return None;
        }
        let min = min_positive.unwrap_or(0) as f64;
        Some(Self {
            bounds: [0.0, min, sum / count as f64, max as f64],
            uniform,
        })
    }

    /// The boundaries `[0, min, average, max]`.
    #[must_use]
    pub fn bounds(&self) -> [f64; 4] {
        self.bounds
    }

    /// Category of a request count.
    ///
    /// The largest index whose boundary the count reaches, scanning upwards and stopping at
    /// the first boundary it falls short of. When every count was equal all edges share
    /// category 0.
    #[must_use]
    pub fn category(&self, requests: u64) -> u8 {
        if self.uniform {
            return 0;
        }
        let value = requests as f64;
        let mut category = 0;
        for (index, bound) in (0_u8..).zip(self.bounds) {
            if value >= bound {
                category = index;
            } else {
                break;
            }
        }
        category
    }
}

impl Routing {
    /// Assigns a thickness to every routed edge.
    ///
    /// Self-loops do not take part in deriving the boundaries and always get category 0.
    /// Returns the boundaries, or `None` if there was no edge to derive them from (in which
    /// case every edge gets the base thickness).
    pub fn classify(&mut self, config: &ThicknessConfig) -> Option<Categories> {
        let categories = Categories::from_requests(
            self.edges
                .iter()
                .filter(|edge| !edge.self_loop)
                .map(|edge| edge.request_count),
        );
        for edge in &mut self.edges {
            let category = match &categories {
                Some(categories) if !edge.self_loop => categories.category(edge.request_count),
                _ => 0,
            };
            edge.thickness = config.thickness(category);
        }
        categories
    }
}
