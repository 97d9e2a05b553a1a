//! Content-stream interpreter.
//!
//! Replays a page's drawing program against the graphics/text state
//! machine, emitting text events to a [`DrawingSink`]. Tokenization is
//! delegated to `lopdf::content::Content::decode`, which produces the
//! ordered operator/operand list (and treats inline-image regions as
//! opaque).
//!
//! Error policy: an unrecognized operator or malformed operand list
//! degrades to a warned no-op; `Q` underflow clamps; the Form-XObject
//! depth cap stops descending with a warning. The one hard failure is a
//! text-showing operator whose font cannot be resolved — without it no
//! text can be decoded, so the page render aborts.

use pdfsift_core::{Mat3, Warning, WarningCode};

use crate::error::BackendError;
use crate::font::FontCache;
use crate::graphics_state::{Color, DashPattern, GraphicsStack, LineCap, LineJoin};
use crate::objects::{decode_stream, dict_get, object_to_f64, resolve_ref};
use crate::sink::{DrawingSink, TextAdvanceEvent, TextShowEvent};
use crate::text_state::{TextObject, TextRenderMode};

/// Interpreter limits and decoding settings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Form XObject nesting level at which descent stops (with a
    /// warning). The only runaway-computation guard in the pipeline.
    pub max_form_depth: usize,
    /// Drop undecodable character codes instead of emitting a
    /// `\u{hex}` placeholder.
    pub skip_missing: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_form_depth: 5,
            skip_missing: false,
        }
    }
}

/// Interpret one content stream against the given state.
///
/// `depth` is 0 for page-level content and increments per Form XObject.
/// The text matrices are local to this invocation: a recursively drawn
/// form never inherits or leaks them.
#[allow(clippy::too_many_arguments)]
pub fn interpret_content_stream(
    doc: &lopdf::Document,
    stream_bytes: &[u8],
    resources: &lopdf::Dictionary,
    fonts: &FontCache,
    sink: &mut dyn DrawingSink,
    options: &RenderOptions,
    depth: usize,
    states: &mut GraphicsStack,
) -> Result<(), BackendError> {
    let content = lopdf::content::Content::decode(stream_bytes)
        .map_err(|e| BackendError::Parse(format!("content stream tokenization failed: {e}")))?;

    let mut text: Option<TextObject> = None;

    for (op_index, op) in content.operations.iter().enumerate() {
        let operands = &op.operands;
        match op.operator.as_str() {
            // --- Special graphics state ---
            "q" => states.push(),
            "Q" => {
                if !states.pop() {
                    sink.warning(
                        Warning::new(WarningCode::StateUnderflow, "Q without matching q")
                            .at_op(op_index),
                    );
                }
            }
            "cm" => match matrix_operands(operands) {
                Some(m) => states.current_mut().concat_ctm(&m),
                None => warn_operands(sink, op_index, "cm"),
            },

            // --- General graphics state ---
            "w" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().line_width = v;
                }
            }
            "J" => {
                if let Some(cap) = op_i64(operands, 0).and_then(LineCap::from_i64) {
                    states.current_mut().line_cap = cap;
                }
            }
            "j" => {
                if let Some(join) = op_i64(operands, 0).and_then(LineJoin::from_i64) {
                    states.current_mut().line_join = join;
                }
            }
            "M" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().miter_limit = v;
                }
            }
            "i" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().flatness = v;
                }
            }
            "ri" => {
                if let Some(name) = op_name(operands, 0) {
                    states.current_mut().rendering_intent = name;
                }
            }
            "d" => {
                if let (Some(lopdf::Object::Array(arr)), Some(phase)) =
                    (operands.first(), op_f64(operands, 1))
                {
                    let array: Vec<f64> = arr.iter().filter_map(object_to_f64).collect();
                    states.current_mut().dash = DashPattern { array, phase };
                }
            }
            "gs" => {
                if let Some(name) = op_name(operands, 0) {
                    apply_ext_gstate(doc, resources, states, sink, &name, op_index);
                }
            }

            // --- Color ---
            "G" => {
                if let Some(g) = op_f32(operands, 0) {
                    states.current_mut().stroke_color = Color::Gray(g);
                }
            }
            "g" => {
                if let Some(g) = op_f32(operands, 0) {
                    states.current_mut().fill_color = Color::Gray(g);
                }
            }
            "RG" => {
                if let Some(c) = rgb_operands(operands) {
                    states.current_mut().stroke_color = c;
                }
            }
            "rg" => {
                if let Some(c) = rgb_operands(operands) {
                    states.current_mut().fill_color = c;
                }
            }
            "K" => {
                if let Some(c) = cmyk_operands(operands) {
                    states.current_mut().stroke_color = c;
                }
            }
            "k" => {
                if let Some(c) = cmyk_operands(operands) {
                    states.current_mut().fill_color = c;
                }
            }
            "SC" | "SCN" => {
                if let Some(c) = component_color(operands) {
                    states.current_mut().stroke_color = c;
                }
            }
            "sc" | "scn" => {
                if let Some(c) = component_color(operands) {
                    states.current_mut().fill_color = c;
                }
            }
            // Color space selection is not modeled; components are
            // interpreted by arity alone.
            "CS" | "cs" => {}

            // --- Text objects and state ---
            "BT" => text = Some(TextObject::new()),
            "ET" => text = None,
            "Tc" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().text.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().text.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().text.h_scaling = v;
                }
            }
            "TL" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().text.leading = v;
                }
            }
            "Tf" => {
                if let (Some(name), Some(size)) = (op_name(operands, 0), op_f64(operands, 1)) {
                    let ts = &mut states.current_mut().text;
                    ts.font_name = name;
                    ts.font_size = size;
                } else {
                    warn_operands(sink, op_index, "Tf");
                }
            }
            "Tr" => {
                if let Some(mode) = op_i64(operands, 0).and_then(TextRenderMode::from_i64) {
                    states.current_mut().text.render_mode = mode;
                }
            }
            "Ts" => {
                if let Some(v) = op_f64(operands, 0) {
                    states.current_mut().text.rise = v;
                }
            }

            // --- Text positioning ---
            "Td" => {
                if let (Some(tx), Some(ty)) = (op_f64(operands, 0), op_f64(operands, 1)) {
                    ensure_text(&mut text, sink, op_index, "Td").translate_line(tx, ty);
                } else {
                    warn_operands(sink, op_index, "Td");
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op_f64(operands, 0), op_f64(operands, 1)) {
                    states.current_mut().text.leading = -ty;
                    ensure_text(&mut text, sink, op_index, "TD").translate_line(tx, ty);
                } else {
                    warn_operands(sink, op_index, "TD");
                }
            }
            "Tm" => match matrix_operands(operands) {
                Some(m) => ensure_text(&mut text, sink, op_index, "Tm").set_matrix(m),
                None => warn_operands(sink, op_index, "Tm"),
            },
            "T*" => {
                let leading = states.current().text.leading;
                ensure_text(&mut text, sink, op_index, "T*").translate_line(0.0, -leading);
            }

            // --- Text showing ---
            "Tj" => {
                if let Some(bytes) = op_string_bytes(operands, 0) {
                    let t = ensure_text(&mut text, sink, op_index, "Tj");
                    show_bytes(
                        doc, resources, fonts, sink, options, op_index, states, t, bytes,
                    )?;
                } else {
                    warn_operands(sink, op_index, "Tj");
                }
            }
            "TJ" => {
                if let Some(lopdf::Object::Array(elements)) = operands.first() {
                    let t = ensure_text(&mut text, sink, op_index, "TJ");
                    for element in elements {
                        match element {
                            lopdf::Object::String(bytes, _) => {
                                show_bytes(
                                    doc, resources, fonts, sink, options, op_index, states, t,
                                    bytes,
                                )?;
                            }
                            lopdf::Object::Integer(_) | lopdf::Object::Real(_) => {
                                let adj = object_to_f64(element).unwrap_or(0.0);
                                let ts = &states.current().text;
                                let tx =
                                    -(adj / 1000.0) * ts.font_size * ts.h_scaling_normalized();
                                sink.advance_text(TextAdvanceEvent { amount: tx });
                                t.advance(tx);
                            }
                            _ => {}
                        }
                    }
                } else {
                    warn_operands(sink, op_index, "TJ");
                }
            }
            "'" => {
                if let Some(bytes) = op_string_bytes(operands, 0) {
                    let leading = states.current().text.leading;
                    let t = ensure_text(&mut text, sink, op_index, "'");
                    t.translate_line(0.0, -leading);
                    show_bytes(
                        doc, resources, fonts, sink, options, op_index, states, t, bytes,
                    )?;
                } else {
                    warn_operands(sink, op_index, "'");
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac), Some(bytes)) = (
                    op_f64(operands, 0),
                    op_f64(operands, 1),
                    op_string_bytes(operands, 2),
                ) {
                    {
                        let ts = &mut states.current_mut().text;
                        ts.word_spacing = aw;
                        ts.char_spacing = ac;
                    }
                    let leading = states.current().text.leading;
                    let t = ensure_text(&mut text, sink, op_index, "\"");
                    t.translate_line(0.0, -leading);
                    show_bytes(
                        doc, resources, fonts, sink, options, op_index, states, t, bytes,
                    )?;
                } else {
                    warn_operands(sink, op_index, "\"");
                }
            }

            // --- XObjects ---
            "Do" => {
                if let Some(name) = op_name(operands, 0) {
                    draw_xobject(
                        doc, resources, fonts, sink, options, depth, states, &name, op_index,
                    )?;
                } else {
                    warn_operands(sink, op_index, "Do");
                }
            }

            // --- Paths and clipping: positions only, never rasterized ---
            "m" | "l" | "c" | "v" | "y" | "re" | "h" => {}
            "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" | "n" => {}
            "W" | "W*" => {}
            "sh" => {}

            // --- Marked content and compatibility sections ---
            "BMC" | "BDC" | "EMC" | "MP" | "DP" => {}
            "BX" | "EX" => {}

            // --- Inline images: raw data is opaque ---
            "BI" => {
                debug_log!("skipping inline image at op #{op_index}");
            }

            other => {
                sink.warning(
                    Warning::new(
                        WarningCode::UnknownOperator,
                        format!("unrecognized operator '{other}'"),
                    )
                    .at_op(op_index),
                );
            }
        }
    }

    Ok(())
}

/// Open an implicit text object (with a warning) when a text operator
/// appears outside BT/ET.
fn ensure_text<'a>(
    slot: &'a mut Option<TextObject>,
    sink: &mut dyn DrawingSink,
    op_index: usize,
    op: &str,
) -> &'a mut TextObject {
    if slot.is_none() {
        sink.warning(
            Warning::new(
                WarningCode::OutsideTextObject,
                format!("'{op}' outside BT/ET; opening an implicit text object"),
            )
            .at_op(op_index),
        );
    }
    slot.get_or_insert_with(TextObject::new)
}

fn warn_operands(sink: &mut dyn DrawingSink, op_index: usize, op: &str) {
    sink.warning(
        Warning::new(
            WarningCode::MalformedOperands,
            format!("'{op}' with missing or ill-typed operands"),
        )
        .at_op(op_index),
    );
}

/// Decode, measure, and show one byte string, then advance the text
/// matrix by
/// `tx = ((width/1000)·size + Tc·n_chars + Tw·n_spaces) · (Tz/100)`.
///
/// `n_spaces` counts U+0020 in the decoded text — an approximation of
/// the single-byte-space rule that holds for the encodings handled here.
#[allow(clippy::too_many_arguments)]
fn show_bytes(
    doc: &lopdf::Document,
    resources: &lopdf::Dictionary,
    fonts: &FontCache,
    sink: &mut dyn DrawingSink,
    options: &RenderOptions,
    op_index: usize,
    states: &GraphicsStack,
    text: &mut TextObject,
    bytes: &[u8],
) -> Result<(), BackendError> {
    let state = states.current();
    let ts = &state.text;
    let font = fonts.load(doc, resources, &ts.font_name)?;

    let (codes, mismatch) = font.char_codes(bytes);
    if mismatch {
        sink.warning(
            Warning::new(
                WarningCode::LengthMismatch,
                format!(
                    "string of {} bytes does not divide into {}-byte codes",
                    bytes.len(),
                    font.byte_len()
                ),
            )
            .at_op(op_index)
            .with_font(ts.font_name.clone()),
        );
    }

    let decoded = font.decode_codes(&codes, options.skip_missing);
    let width = font.measure_codes(&codes);
    let n_chars = codes.len() as f64;
    let n_spaces = decoded.chars().filter(|&c| c == ' ').count() as f64;
    let h_scaling = ts.h_scaling_normalized();
    let tx = ((width / 1000.0) * ts.font_size
        + ts.char_spacing * n_chars
        + ts.word_spacing * n_spaces)
        * h_scaling;

    sink.show_text(TextShowEvent {
        text: decoded,
        raw: bytes.to_vec(),
        font_name: font.base_name.clone(),
        font_size: ts.font_size,
        bold: font.bold,
        italic: font.italic,
        byte_len: font.byte_len(),
        advance: tx,
        text_matrix: *text.text_matrix(),
        ctm: state.ctm,
        h_scaling,
        rise: ts.rise,
        ascent: font.ascent,
        descent: font.descent,
    });

    text.advance(tx);
    Ok(())
}

/// `Do`: draw a Form XObject recursively; skip images and unknown
/// subtypes.
#[allow(clippy::too_many_arguments)]
fn draw_xobject(
    doc: &lopdf::Document,
    resources: &lopdf::Dictionary,
    fonts: &FontCache,
    sink: &mut dyn DrawingSink,
    options: &RenderOptions,
    depth: usize,
    states: &mut GraphicsStack,
    name: &str,
    op_index: usize,
) -> Result<(), BackendError> {
    let stream = dict_get(doc, resources, b"XObject")
        .and_then(|o| o.as_dict().ok())
        .and_then(|xobjects| xobjects.get(name.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_stream().ok());

    let Some(stream) = stream else {
        sink.warning(
            Warning::new(
                WarningCode::MissingResource,
                format!("XObject /{name} not found in resources"),
            )
            .at_op(op_index),
        );
        return Ok(());
    };

    let subtype = stream
        .dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        .unwrap_or(b"");

    match subtype {
        b"Form" => {
            if depth + 1 >= options.max_form_depth {
                sink.warning(
                    Warning::new(
                        WarningCode::DepthCapReached,
                        format!(
                            "form /{name} at nesting depth {} exceeds the cap; not descending",
                            depth + 1
                        ),
                    )
                    .at_op(op_index),
                );
                return Ok(());
            }

            states.push();

            if let Some(m) = dict_get(doc, &stream.dict, b"Matrix")
                .and_then(|o| o.as_array().ok())
                .and_then(|arr| array_to_matrix(arr))
            {
                states.current_mut().concat_ctm(&m);
            }

            let form_resources = dict_get(doc, &stream.dict, b"Resources")
                .and_then(|o| o.as_dict().ok())
                .unwrap_or(resources);

            let content = decode_stream(stream)?;
            interpret_content_stream(
                doc,
                &content,
                form_resources,
                fonts,
                sink,
                options,
                depth + 1,
                states,
            )?;

            states.pop();
            Ok(())
        }
        b"Image" => {
            debug_log!("skipping image XObject /{name}");
            Ok(())
        }
        other => {
            debug_log!(
                "skipping XObject /{name} with unsupported subtype {:?}",
                String::from_utf8_lossy(other)
            );
            Ok(())
        }
    }
}

/// `gs`: apply the named ExtGState's modeled keys (`LW`, `D`).
fn apply_ext_gstate(
    doc: &lopdf::Document,
    resources: &lopdf::Dictionary,
    states: &mut GraphicsStack,
    sink: &mut dyn DrawingSink,
    name: &str,
    op_index: usize,
) {
    let ext = dict_get(doc, resources, b"ExtGState")
        .and_then(|o| o.as_dict().ok())
        .and_then(|d| d.get(name.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok());

    let Some(ext) = ext else {
        sink.warning(
            Warning::new(
                WarningCode::MissingResource,
                format!("ExtGState /{name} not found in resources"),
            )
            .at_op(op_index),
        );
        return;
    };

    if let Some(lw) = dict_get(doc, ext, b"LW").and_then(object_to_f64) {
        states.current_mut().line_width = lw;
    }

    if let Some(arr) = dict_get(doc, ext, b"D").and_then(|o| o.as_array().ok()) {
        if arr.len() >= 2 {
            if let (Ok(dashes), Some(phase)) =
                (arr[0].as_array(), object_to_f64(resolve_ref(doc, &arr[1])))
            {
                let array: Vec<f64> = dashes.iter().filter_map(object_to_f64).collect();
                states.current_mut().dash = DashPattern { array, phase };
            }
        }
    }
}

// --- Operand helpers ---

fn op_f64(operands: &[lopdf::Object], index: usize) -> Option<f64> {
    operands.get(index).and_then(object_to_f64)
}

fn op_f32(operands: &[lopdf::Object], index: usize) -> Option<f32> {
    op_f64(operands, index).map(|v| v as f32)
}

fn op_i64(operands: &[lopdf::Object], index: usize) -> Option<i64> {
    operands.get(index).and_then(crate::objects::object_to_i64)
}

fn op_name(operands: &[lopdf::Object], index: usize) -> Option<String> {
    operands.get(index).and_then(crate::objects::name_to_string)
}

fn op_string_bytes(operands: &[lopdf::Object], index: usize) -> Option<&[u8]> {
    match operands.get(index) {
        Some(lopdf::Object::String(bytes, _)) => Some(bytes),
        _ => None,
    }
}

fn matrix_operands(operands: &[lopdf::Object]) -> Option<Mat3> {
    if operands.len() < 6 {
        return None;
    }
    Some(Mat3::new(
        op_f64(operands, 0)?,
        op_f64(operands, 1)?,
        op_f64(operands, 2)?,
        op_f64(operands, 3)?,
        op_f64(operands, 4)?,
        op_f64(operands, 5)?,
    ))
}

fn rgb_operands(operands: &[lopdf::Object]) -> Option<Color> {
    Some(Color::Rgb(
        op_f32(operands, 0)?,
        op_f32(operands, 1)?,
        op_f32(operands, 2)?,
    ))
}

fn cmyk_operands(operands: &[lopdf::Object]) -> Option<Color> {
    Some(Color::Cmyk(
        op_f32(operands, 0)?,
        op_f32(operands, 1)?,
        op_f32(operands, 2)?,
        op_f32(operands, 3)?,
    ))
}

/// `SC`/`SCN` and friends: interpret the components by arity.
fn component_color(operands: &[lopdf::Object]) -> Option<Color> {
    let components: Vec<f32> = operands
        .iter()
        .filter_map(|o| object_to_f64(o).map(|v| v as f32))
        .collect();
    match components.len() {
        1 => Some(Color::Gray(components[0])),
        3 => Some(Color::Rgb(components[0], components[1], components[2])),
        4 => Some(Color::Cmyk(
            components[0],
            components[1],
            components[2],
            components[3],
        )),
        _ => None,
    }
}

fn array_to_matrix(arr: &[lopdf::Object]) -> Option<Mat3> {
    if arr.len() != 6 {
        return None;
    }
    let values: Vec<f64> = arr.iter().filter_map(object_to_f64).collect();
    if values.len() != 6 {
        return None;
    }
    Some(Mat3::new(
        values[0], values[1], values[2], values[3], values[4], values[5],
    ))
}
