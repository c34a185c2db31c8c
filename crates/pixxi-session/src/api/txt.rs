bind! {
    /// Returns the previous attribute set.
    fn txt_attributes(attributes) -> u16 = call_word(TxtAttributes);
    fn txt_bg_colour(colour) -> u16 = call_word(TxtBGcolour);
    fn txt_bold(mode) -> u16 = call_word(TxtBold);
    fn txt_fg_colour(colour) -> u16 = call_word(TxtFGcolour);
    fn txt_font_id(font) -> u16 = call_word(TxtFontID);
    fn txt_height(multiplier) -> u16 = call_word(TxtHeight);
    fn txt_inverse(mode) -> u16 = call_word(TxtInverse);
    fn txt_italic(mode) -> u16 = call_word(TxtItalic);
    fn txt_opacity(mode) -> u16 = call_word(TxtOpacity);
    fn txt_underline(mode) -> u16 = call_word(TxtUnderline);
    fn txt_width(multiplier) -> u16 = call_word(TxtWidth);
    fn txt_wrap(position) -> u16 = call_word(TxtWrap);
    fn txt_xgap(pixels) -> u16 = call_word(TxtXgap);
    fn txt_ygap(pixels) -> u16 = call_word(TxtYgap);

    fn txt_move_cursor(line, column) -> () = call_ack(TxtMoveCursor);
    fn txt_set(function, value) -> () = call_ack(TxtSet);
}
