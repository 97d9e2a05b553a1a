//! Graphics state and the q/Q save stack.
//!
//! [`GraphicsState`] is a plain value type: every field, including the
//! nested [`TextState`], is owned data, so `q` is a structural clone and
//! `Q` is a move back. [`GraphicsStack`] guards against underflow — a
//! `Q` with no matching `q` keeps the base state instead of failing.

use pdfsift_core::Mat3;

use crate::text_state::TextState;

/// A device-independent color in one of the device color spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Gray(f32),
    Rgb(f32, f32, f32),
    Cmyk(f32, f32, f32, f32),
}

impl Color {
    pub fn black() -> Self {
        Color::Gray(0.0)
    }
}

/// Line dash pattern (`d` operator).
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    pub array: Vec<f64>,
    pub phase: f64,
}

impl DashPattern {
    pub fn solid() -> Self {
        Self {
            array: Vec::new(),
            phase: 0.0,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }
}

/// Line cap style (`J` operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

impl LineCap {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Butt),
            1 => Some(Self::Round),
            2 => Some(Self::Square),
            _ => None,
        }
    }
}

/// Line join style (`j` operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

impl LineJoin {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Miter),
            1 => Some(Self::Round),
            2 => Some(Self::Bevel),
            _ => None,
        }
    }
}

/// The full graphics state saved and restored by q/Q.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    pub ctm: Mat3,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub dash: DashPattern,
    pub rendering_intent: String,
    pub flatness: f64,
    pub text: TextState,
}

impl GraphicsState {
    pub fn new() -> Self {
        Self {
            ctm: Mat3::identity(),
            stroke_color: Color::black(),
            fill_color: Color::black(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            dash: DashPattern::solid(),
            rendering_intent: "RelativeColorimetric".to_string(),
            flatness: 1.0,
            text: TextState::new(),
        }
    }

    /// `cm` operator: pre-multiply the operand matrix onto the CTM.
    pub fn concat_ctm(&mut self, m: &Mat3) {
        self.ctm = m.concat(&self.ctm);
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new()
    }
}

/// The q/Q stack. Always holds a current state; underflow clamps.
#[derive(Debug, Clone)]
pub struct GraphicsStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl GraphicsStack {
    pub fn new() -> Self {
        Self {
            current: GraphicsState::new(),
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    /// `q`: save a full clone of the current state.
    pub fn push(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// `Q`: restore the most recently saved state. Returns `false` (and
    /// leaves the current state untouched) when nothing was saved.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

impl Default for GraphicsStack {
    fn default() -> Self {
        Self::new()
    }
}
