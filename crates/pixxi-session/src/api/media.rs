use bytes::Bytes;
use pixxi_transport::Transport;

use crate::error::Result;
use crate::ops::Arg;
use crate::session::Session;
use crate::table::Op;

bind! {
    fn media_flush() -> u16 = call_word(MediaFlush);
    /// Non-zero when a card is present and initialised.
    fn media_init() -> u16 = call_word(MediaInit);
    fn media_read_byte() -> u16 = call_word(MediaReadByte);
    fn media_read_word() -> u16 = call_word(MediaReadWord);
    fn media_write_byte(value) -> u16 = call_word(MediaWriteByte);
    fn media_write_word(value) -> u16 = call_word(MediaWriteWord);

    fn media_image(x, y) -> () = call_ack(MediaImage);
    fn media_set_add(hi_word, lo_word) -> () = call_ack(MediaSetAdd);
    fn media_set_sector(hi_word, lo_word) -> () = call_ack(MediaSetSector);
    fn media_video(x, y) -> () = call_ack(MediaVideo);
    fn media_video_frame(x, y, frame) -> () = call_ack(MediaVideoFrame);
}

impl<T: Transport> Session<T> {
    /// Read the sector selected by [`media_set_sector`](Self::media_set_sector).
    ///
    /// Returns the status word and exactly 512 bytes.
    pub fn media_rd_sector(&mut self) -> Result<(u16, Bytes)> {
        self.call_blob(Op::MediaRdSector, &[])
    }

    /// Write one 512-byte sector at the selected sector address.
    pub fn media_wr_sector(&mut self, sector: &[u8]) -> Result<u16> {
        self.call_word(Op::MediaWrSector, &[Arg::Bytes(sector)])
    }
}
