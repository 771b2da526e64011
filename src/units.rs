//! Length units and the project-to-kernel conversion factor.

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::Length,
    length::{centimeter, foot, inch, meter, millimeter, Conversion as LengthConversion, Unit},
};

use crate::errors::ConfigurationError;

/// Length unit that can be named in a job file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// Millimetres.
    Millimeter,
    /// Centimetres.
    Centimeter,
    /// Metres.
    Meter,
    /// International feet.
    Foot,
    /// International inches.
    Inch,
}

impl LengthUnit {
    /// Wrap a value expressed in this unit as a [`Length`].
    #[must_use]
    pub fn length(self, value: f64) -> Length {
        match self {
            Self::Millimeter => Length::new::<millimeter>(value),
            Self::Centimeter => Length::new::<centimeter>(value),
            Self::Meter => Length::new::<meter>(value),
            Self::Foot => Length::new::<foot>(value),
            Self::Inch => Length::new::<inch>(value),
        }
    }

    /// Express a [`Length`] as a value in this unit.
    #[must_use]
    pub fn value(self, length: Length) -> f64 {
        match self {
            Self::Millimeter => length.get::<millimeter>(),
            Self::Centimeter => length.get::<centimeter>(),
            Self::Meter => length.get::<meter>(),
            Self::Foot => length.get::<foot>(),
            Self::Inch => length.get::<inch>(),
        }
    }
}

/// Number of kernel length units per project length unit.
///
/// Offset distances are configured in project units; geometry lives in kernel
/// units. The conversion is a single multiplication.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthScale {
    /// Kernel units per project unit.
    factor: f64,
}

impl Default for LengthScale {
    fn default() -> Self {
        Self::identity()
    }
}

impl LengthScale {
    /// Scale for inputs already expressed in kernel units.
    #[must_use]
    pub const fn identity() -> Self {
        Self { factor: 1.0 }
    }

    /// Build a scale from an explicit factor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidUnitFactor`] when `factor` is not
    /// strictly positive and finite.
    pub fn from_factor(factor: f64) -> Result<Self, ConfigurationError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self { factor })
        } else {
            Err(ConfigurationError::InvalidUnitFactor { factor })
        }
    }

    /// Build the scale between two statically known units.
    ///
    /// # Examples
    /// ```
    /// use beamaxis::LengthScale;
    /// use uom::si::length::{foot, millimeter};
    ///
    /// let scale = LengthScale::between::<millimeter, foot>();
    /// assert!((scale.to_kernel(304.8) - 1.0).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn between<P, K>() -> Self
    where
        P: Unit + LengthConversion<f64>,
        K: Unit + LengthConversion<f64>,
    {
        Self {
            factor: Length::new::<P>(1.0).get::<K>(),
        }
    }

    /// Build the scale between two units named at runtime.
    #[must_use]
    pub fn between_units(project: LengthUnit, kernel: LengthUnit) -> Self {
        Self {
            factor: kernel.value(project.length(1.0)),
        }
    }

    /// Kernel units per project unit.
    #[must_use]
    pub fn factor(self) -> f64 {
        self.factor
    }

    /// Convert a project-unit distance into kernel units.
    #[must_use]
    pub fn to_kernel(self, distance: f64) -> f64 {
        distance * self.factor
    }
}
