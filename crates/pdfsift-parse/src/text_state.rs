//! Text state and text-object matrices.
//!
//! [`TextState`] holds the parameters set by the text state operators
//! (Tc, Tw, Tz, TL, Tf, Tr, Ts). It lives inside the graphics state, so
//! it persists across BT/ET pairs and is saved/restored by q/Q.
//!
//! [`TextObject`] holds the text matrix and text line matrix. These
//! exist only between BT and ET: BT resets both to identity, ET discards
//! them, and a recursively drawn Form XObject gets its own pair.

use pdfsift_core::Mat3;

/// Text rendering mode (Tr operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRenderMode {
    /// Fill glyphs (default).
    #[default]
    Fill = 0,
    Stroke = 1,
    FillStroke = 2,
    /// Neither fill nor stroke (invisible text).
    Invisible = 3,
    FillClip = 4,
    StrokeClip = 5,
    FillStrokeClip = 6,
    Clip = 7,
}

impl TextRenderMode {
    /// Map the Tr operand (0–7) to a mode. Returns `None` for out-of-range values.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Fill),
            1 => Some(Self::Stroke),
            2 => Some(Self::FillStroke),
            3 => Some(Self::Invisible),
            4 => Some(Self::FillClip),
            5 => Some(Self::StrokeClip),
            6 => Some(Self::FillStrokeClip),
            7 => Some(Self::Clip),
            _ => None,
        }
    }
}

/// Text parameters that are part of the graphics state.
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    /// Extra space after each glyph (Tc).
    pub char_spacing: f64,
    /// Extra space after each space character (Tw).
    pub word_spacing: f64,
    /// Horizontal scaling as a percentage, 100 = normal (Tz).
    pub h_scaling: f64,
    /// Baseline-to-baseline distance for T* and ' (TL).
    pub leading: f64,
    /// Resource name of the current font (Tf).
    pub font_name: String,
    /// Current font size (Tf).
    pub font_size: f64,
    /// Glyph painting mode (Tr).
    pub render_mode: TextRenderMode,
    /// Baseline offset for super/subscripts (Ts).
    pub rise: f64,
}

impl TextState {
    pub fn new() -> Self {
        Self {
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scaling: 100.0,
            leading: 0.0,
            font_name: String::new(),
            font_size: 0.0,
            render_mode: TextRenderMode::default(),
            rise: 0.0,
        }
    }

    /// Horizontal scaling as a fraction (1.0 = 100%).
    pub fn h_scaling_normalized(&self) -> f64 {
        self.h_scaling / 100.0
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

/// The BT/ET-scoped matrix pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    tm: Mat3,
    tlm: Mat3,
}

impl TextObject {
    /// Fresh text object with both matrices at identity (the BT state).
    pub fn new() -> Self {
        Self {
            tm: Mat3::identity(),
            tlm: Mat3::identity(),
        }
    }

    pub fn text_matrix(&self) -> &Mat3 {
        &self.tm
    }

    pub fn line_matrix(&self) -> &Mat3 {
        &self.tlm
    }

    /// `Tm` operator: replace (not concatenate) both matrices.
    pub fn set_matrix(&mut self, m: Mat3) {
        self.tm = m;
        self.tlm = m;
    }

    /// `Td` operator: translate the *line* matrix and restart the text
    /// matrix from it.
    pub fn translate_line(&mut self, tx: f64, ty: f64) {
        self.tlm = Mat3::translation(tx, ty).concat(&self.tlm);
        self.tm = self.tlm;
    }

    /// Advance the text matrix horizontally after showing text. The line
    /// matrix is untouched.
    pub fn advance(&mut self, tx: f64) {
        self.tm = Mat3::translation(tx, 0.0).concat(&self.tm);
    }
}

impl Default for TextObject {
    fn default() -> Self {
        Self::new()
    }
}
