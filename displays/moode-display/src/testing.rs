//! Recording display backend for host tests
//!
//! Captures every backend call so tests can assert on what a screen drew,
//! where, and in which colour.

use alloc::string::String;
use alloc::vec::Vec;

use crate::backend::{DisplayBackend, DisplayError};
use crate::pen::Pen;

/// A single recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Pen(Pen),
    Clear,
    Text {
        text: String,
        x: i32,
        y: i32,
        scale: u8,
        /// Pen active when the text was drawn
        pen: Pen,
    },
    Update,
    Backlight(f32),
}

impl DrawOp {
    /// Shorthand for building an expected `Text` op
    pub fn text(text: &str, x: i32, y: i32, scale: u8, pen: Pen) -> Self {
        DrawOp::Text {
            text: text.into(),
            x,
            y,
            scale,
            pen,
        }
    }
}

/// Backend that records calls instead of drawing
#[derive(Debug)]
pub struct RecordingDisplay {
    ops: Vec<DrawOp>,
    pen: Pen,
    width: u16,
    height: u16,
    /// Make `update` fail, to exercise error paths
    pub fail_updates: bool,
}

impl RecordingDisplay {
    /// A 320x240 recorder
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pen: Pen::WHITE,
            width: 320,
            height: 240,
            fail_updates: false,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Drawn strings in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First text op drawing exactly `needle`
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }

    /// Number of committed frames
    pub fn update_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Update).count()
    }

    /// Backlight levels in the order they were set
    pub fn backlight_levels(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Backlight(level) => Some(*level),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBackend for RecordingDisplay {
    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
        self.ops.push(DrawOp::Pen(pen));
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn text(&mut self, text: &str, x: i32, y: i32, scale: u8) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            scale,
            pen: self.pen,
        });
        Ok(())
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        if self.fail_updates {
            return Err(DisplayError::Communication);
        }
        self.ops.push(DrawOp::Update);
        Ok(())
    }

    fn set_backlight(&mut self, level: f32) -> Result<(), DisplayError> {
        self.ops.push(DrawOp::Backlight(level.clamp(0.0, 1.0)));
        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
