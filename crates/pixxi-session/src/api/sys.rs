use pixxi_transport::Transport;

use crate::api::gfx::run_len;
use crate::error::Result;
use crate::ops::Arg;
use crate::session::Session;
use crate::table::Op;

bind! {
    fn bus_in() -> u16 = call_word(BusIn);
    fn bus_read() -> u16 = call_word(BusRead);
    fn bus_out(value) -> () = call_ack(BusOut);
    fn bus_set(direction_mask) -> () = call_ack(BusSet);
    fn bus_write(value) -> () = call_ack(BusWrite);

    /// Display RAM allocation; returns the address, or 0 when out of memory.
    fn mem_alloc(size) -> u16 = call_word(MemAlloc);
    fn mem_free(address) -> u16 = call_word(MemFree);
    /// Largest free block.
    fn mem_heap() -> u16 = call_word(MemHeap);
    fn peek_m(address) -> u16 = call_word(PeekM);
    fn poke_m(address, value) -> () = call_ack(PokeM);

    fn pin_hi(pin) -> u16 = call_word(PinHi);
    fn pin_lo(pin) -> u16 = call_word(PinLo);
    fn pin_read(pin) -> u16 = call_word(PinRead);
    fn pin_set(mode, pin) -> u16 = call_word(PinSet);

    /// Print one character at the cursor.
    fn put_ch(character) -> () = call_ack(PutCh);

    fn snd_buf_size(size) -> () = call_ack(SndBufSize);
    fn snd_continue() -> () = call_ack(SndContinue);
    fn snd_pause() -> () = call_ack(SndPause);
    fn snd_stop() -> () = call_ack(SndStop);
    fn snd_volume(volume) -> () = call_ack(SndVolume);
    fn snd_pitch(pitch) -> u16 = call_word(SndPitch);
    /// Blocks remaining in the playing sample, 0 when idle.
    fn snd_playing() -> u16 = call_word(SndPlaying);

    fn sys_sleep(seconds) -> u16 = call_word(SysSleep);
    fn sys_get_version() -> u16 = call_word(SysGetVersion);
    fn sys_get_pmmc() -> u16 = call_word(SysGetPmmC);

    fn touch_detect_region(x1, y1, x2, y2) -> () = call_ack(TouchDetectRegion);
    fn touch_get(mode) -> u16 = call_word(TouchGet);
    fn touch_set(mode) -> () = call_ack(TouchSet);

    /// Pointer to the string at a byte-addressed buffer.
    fn str_ptr(buffer) -> u16 = call_word(StrPtr);
}

impl<T: Transport> Session<T> {
    /// Height in pixels of `character` in the current font.
    pub fn charheight(&mut self, character: u8) -> Result<u16> {
        self.call_word(Op::CharHeight, &[Arg::Byte(character)])
    }

    /// Width in pixels of `character` in the current font.
    pub fn charwidth(&mut self, character: u8) -> Result<u16> {
        self.call_word(Op::CharWidth, &[Arg::Byte(character)])
    }

    /// Print `text` at the cursor; returns the display's string pointer.
    pub fn put_str(&mut self, text: &str) -> Result<u16> {
        self.call_word(Op::PutStr, &[Arg::Text(text)])
    }

    /// Model name of the attached display.
    pub fn sys_get_model(&mut self) -> Result<String> {
        self.call_text(Op::SysGetModel, &[])
    }

    /// Read a string from a string handle.
    pub fn read_string(&mut self, handle: u16) -> Result<String> {
        self.call_text(Op::ReadString, &[Arg::Word(handle)])
    }

    pub fn write_string(&mut self, handle: u16, text: &str) -> Result<u16> {
        self.call_word(Op::WriteString, &[Arg::Word(handle), Arg::Text(text)])
    }

    /// Copy RGB565 pixels straight to a screen rectangle.
    ///
    /// `pixels` must hold exactly `width * height * 2` bytes.
    pub fn blit_com_to_display(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixels: &[u8],
    ) -> Result<()> {
        self.call_ack(
            Op::BlitComToDisplay,
            &[
                Arg::Word(x),
                Arg::Word(y),
                Arg::Word(width),
                Arg::Word(height),
                Arg::Bytes(pixels),
            ],
        )
    }

    pub fn send_word_array_to_ram(&mut self, address: u16, words: &[u16]) -> Result<()> {
        let count = run_len(Op::SendWordArrayToRam, words.len())?;
        self.call_ack(
            Op::SendWordArrayToRam,
            &[Arg::Word(address), Arg::Word(count), Arg::Words(words)],
        )
    }

    pub fn send_byte_array_to_ram(&mut self, address: u16, bytes: &[u8]) -> Result<()> {
        let count = run_len(Op::SendByteArrayToRam, bytes.len())?;
        self.call_ack(
            Op::SendByteArrayToRam,
            &[Arg::Word(address), Arg::Word(count), Arg::Bytes(bytes)],
        )
    }
}
