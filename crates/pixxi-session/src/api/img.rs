bind! {
    fn img_clear_attributes(handle, index, value) -> u16 = call_word(ImgClearAttributes);
    fn img_set_attributes(handle, index, value) -> u16 = call_word(ImgSetAttributes);
    fn img_darken(handle, index) -> u16 = call_word(ImgDarken);
    fn img_disable(handle, index) -> u16 = call_word(ImgDisable);
    fn img_enable(handle, index) -> u16 = call_word(ImgEnable);
    fn img_lighten(handle, index) -> u16 = call_word(ImgLighten);
    fn img_show(handle, index) -> u16 = call_word(ImgShow);
    /// Index of the touched image, or `0xFFFF` when none is.
    fn img_touched(handle, index) -> u16 = call_word(ImgTouched);
    fn img_get_word(handle, index, offset) -> u16 = call_word(ImgGetWord);
    fn img_set_position(handle, index, x, y) -> u16 = call_word(ImgSetPosition);
    fn img_set_word(handle, index, offset, word) -> u16 = call_word(ImgSetWord);

    fn img_function_call(handle, index, x, y, width, height, function) -> () = call_ack(ImgFunctionCall);
}
