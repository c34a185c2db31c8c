bind! {
    /// Allocate a widget list with room for `count` widgets; returns its handle.
    fn widget_create(count) -> u16 = call_word(WidgetCreate);
    fn widget_realloc(handle, count) -> u16 = call_word(WidgetRealloc);
    fn widget_set_word(handle, index, offset, word) -> u16 = call_word(WidgetSetWord);
    fn widget_get_word(handle, index, offset) -> u16 = call_word(WidgetGetWord);
    fn widget_set_position(handle, index, x, y) -> u16 = call_word(WidgetSetPosition);
    fn widget_enable(handle, index) -> u16 = call_word(WidgetEnable);
    fn widget_disable(handle, index) -> u16 = call_word(WidgetDisable);
    /// Index of the touched widget, or `0xFFFF` when none is.
    fn widget_touched(handle, index) -> u16 = call_word(WidgetTouched);
    fn widget_set_attributes(handle, index, value) -> u16 = call_word(WidgetSetAttributes);
    fn widget_clear_attributes(handle, index, value) -> u16 = call_word(WidgetClearAttributes);

    fn widget_add(handle, index, widget) -> () = call_ack(WidgetAdd);
    fn widget_delete(handle, index) -> () = call_ack(WidgetDelete);
    fn widget_init_grad_ram(handle) -> () = call_ack(WidgetInitGradRam);
}
