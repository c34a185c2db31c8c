use pixxi_transport::Transport;

use crate::error::Result;
use crate::ops::Arg;
use crate::session::Session;
use crate::table::Op;

bind! {
    /// Clear the screen to the background colour.
    fn gfx_cls() -> () = call_ack(GfxCls);
    fn gfx_change_colour(old_colour, new_colour) -> () = call_ack(GfxChangeColour);
    fn gfx_circle(x, y, radius, colour) -> () = call_ack(GfxCircle);
    fn gfx_circle_filled(x, y, radius, colour) -> () = call_ack(GfxCircleFilled);
    fn gfx_clipping(enabled) -> () = call_ack(GfxClipping);
    fn gfx_clip_window(x1, y1, x2, y2) -> () = call_ack(GfxClipWindow);
    fn gfx_ellipse(x, y, x_radius, y_radius, colour) -> () = call_ack(GfxEllipse);
    fn gfx_ellipse_filled(x, y, x_radius, y_radius, colour) -> () = call_ack(GfxEllipseFilled);
    fn gfx_line(x1, y1, x2, y2, colour) -> () = call_ack(GfxLine);
    fn gfx_line_to(x, y) -> () = call_ack(GfxLineTo);
    fn gfx_move_to(x, y) -> () = call_ack(GfxMoveTo);
    fn gfx_panel(raised, x, y, width, height, colour) -> () = call_ack(GfxPanel);
    fn gfx_put_pixel(x, y, colour) -> () = call_ack(GfxPutPixel);
    fn gfx_rectangle(x1, y1, x2, y2, colour) -> () = call_ack(GfxRectangle);
    fn gfx_rectangle_filled(x1, y1, x2, y2, colour) -> () = call_ack(GfxRectangleFilled);
    fn gfx_screen_copy_paste(xs, ys, xd, yd, width, height) -> () = call_ack(GfxScreenCopyPaste);
    fn gfx_set(function, value) -> () = call_ack(GfxSet);
    fn gfx_set_clip_region() -> () = call_ack(GfxSetClipRegion);
    fn gfx_triangle(x1, y1, x2, y2, x3, y3, colour) -> () = call_ack(GfxTriangle);
    fn gfx_triangle_filled(x1, y1, x2, y2, x3, y3, colour) -> () = call_ack(GfxTriangleFilled);

    fn gfx_button4(value, handle, param) -> () = call_ack(GfxButton4);
    fn gfx_switch(value, handle, param) -> () = call_ack(GfxSwitch);
    fn gfx_slider5(value, handle, param) -> () = call_ack(GfxSlider5);
    fn gfx_dial(value, handle, param) -> () = call_ack(GfxDial);
    fn gfx_led(value, handle, param) -> () = call_ack(GfxLed);
    fn gfx_gauge(value, handle, param) -> () = call_ack(GfxGauge);
    fn gfx_angular_meter(value, handle, param) -> () = call_ack(GfxAngularMeter);
    fn gfx_led_digits(value, handle, param) -> () = call_ack(GfxLedDigits);
    fn gfx_ruler_gauge(value, handle, param) -> () = call_ack(GfxRulerGauge);
    fn gfx_led_digit(x, y, digit_size, on_colour, off_colour, value) -> () = call_ack(GfxLedDigit);

    /// Returns the previous setting.
    fn gfx_bevel_shadow(value) -> u16 = call_word(GfxBevelShadow);
    /// Returns the previous setting.
    fn gfx_bevel_width(value) -> u16 = call_word(GfxBevelWidth);
    /// Returns the previous background colour.
    fn gfx_bg_colour(colour) -> u16 = call_word(GfxBGcolour);
    fn gfx_contrast(contrast) -> u16 = call_word(GfxContrast);
    fn gfx_frame_delay(msec) -> u16 = call_word(GfxFrameDelay);
    fn gfx_get(mode) -> u16 = call_word(GfxGet);
    fn gfx_get_pixel(x, y) -> u16 = call_word(GfxGetPixel);
    fn gfx_line_pattern(pattern) -> u16 = call_word(GfxLinePattern);
    fn gfx_outline_colour(colour) -> u16 = call_word(GfxOutlineColour);
    fn gfx_screen_mode(mode) -> u16 = call_word(GfxScreenMode);
    fn gfx_transparency(on_off) -> u16 = call_word(GfxTransparency);
    fn gfx_transparent_colour(colour) -> u16 = call_word(GfxTransparentColour);
    /// Draw a slider; returns the scaled value.
    fn gfx_slider(mode, x1, y1, x2, y2, colour, scale, value) -> u16 = call_word(GfxSlider);

    /// Point at `distance` along `angle` from the current origin, as `(x, y)`.
    fn gfx_orbit(angle, distance) -> (u16, u16) = call_two_words(GfxOrbit);
}

impl<T: Transport> Session<T> {
    /// Draw a labelled button. `text` is capped at the text limit.
    #[allow(clippy::too_many_arguments)]
    pub fn gfx_button(
        &mut self,
        up: u16,
        x: u16,
        y: u16,
        button_colour: u16,
        text_colour: u16,
        font: u16,
        text_width: u16,
        text_height: u16,
        text: &str,
    ) -> Result<()> {
        self.call_ack(
            Op::GfxButton,
            &[
                Arg::Word(up),
                Arg::Word(x),
                Arg::Word(y),
                Arg::Word(button_colour),
                Arg::Word(text_colour),
                Arg::Word(font),
                Arg::Word(text_width),
                Arg::Word(text_height),
                Arg::Text(text),
            ],
        )
    }

    /// Closed outline through `xs`/`ys`, which must be the same length.
    pub fn gfx_polygon(&mut self, xs: &[u16], ys: &[u16], colour: u16) -> Result<()> {
        self.vertices(Op::GfxPolygon, xs, ys, colour)
    }

    pub fn gfx_polygon_filled(&mut self, xs: &[u16], ys: &[u16], colour: u16) -> Result<()> {
        self.vertices(Op::GfxPolygonFilled, xs, ys, colour)
    }

    pub fn gfx_polyline(&mut self, xs: &[u16], ys: &[u16], colour: u16) -> Result<()> {
        self.vertices(Op::GfxPolyline, xs, ys, colour)
    }

    fn vertices(&mut self, op: Op, xs: &[u16], ys: &[u16], colour: u16) -> Result<()> {
        let count = run_len(op, xs.len())?;
        self.call_ack(
            op,
            &[
                Arg::Word(count),
                Arg::Words(xs),
                Arg::Words(ys),
                Arg::Word(colour),
            ],
        )
    }
}

/// A run length as its count word.
pub(crate) fn run_len(op: Op, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| crate::error::SessionError::InvalidArgument {
        op: op.name(),
        reason: "run longer than 65535 items",
    })
}
