//! Colors and material handles used by billboard quads.

use std::fmt;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black; the default for boxes without an explicit color.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channels as `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Opaque handle naming a texture/material the host has already loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Material(String);

impl Material {
    /// Name of the host's flat-color square material.
    pub const SQUARE: &'static str = "Square";

    /// Reference a host material by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Material name as understood by the host.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Self::SQUARE)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
