use bytes::Bytes;
use pixxi_transport::Transport;

use crate::api::gfx::run_len;
use crate::error::Result;
use crate::ops::Arg;
use crate::session::Session;
use crate::table::Op;

/// A 32-bit file size or position reported alongside a status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSize {
    /// Status word from the display; non-zero on success.
    pub status: u16,
    pub value: u32,
}

impl FileSize {
    fn from_words((status, hi, lo): (u16, u16, u16)) -> Self {
        Self {
            status,
            value: (u32::from(hi) << 16) | u32::from(lo),
        }
    }
}

bind! {
    fn file_close(handle) -> u16 = call_word(FileClose);
    /// Error code of the last file operation.
    fn file_error() -> u16 = call_word(FileError);
    fn file_find_next() -> u16 = call_word(FileFindNext);
    fn file_get_c(handle) -> u16 = call_word(FileGetC);
    fn file_get_w(handle) -> u16 = call_word(FileGetW);
    fn file_image(x, y, handle) -> u16 = call_word(FileImage);
    fn file_index(handle, hi_size, lo_size, record) -> u16 = call_word(FileIndex);
    fn file_load_image_control_offset(hi_offset, lo_offset, mode) -> u16 = call_word(FileLoadImageControlOffset);
    /// Mount the card's FAT16 file system; non-zero on success.
    fn file_mount() -> u16 = call_word(FileMount);
    fn file_put_c(character, handle) -> u16 = call_word(FilePutC);
    fn file_put_w(word, handle) -> u16 = call_word(FilePutW);
    fn file_rewind(handle) -> u16 = call_word(FileRewind);
    fn file_screen_capture(x, y, width, height, handle) -> u16 = call_word(FileScreenCapture);
    fn file_seek(handle, hi_word, lo_word) -> u16 = call_word(FileSeek);

    fn file_unmount() -> () = call_ack(FileUnmount);
}

impl<T: Transport> Session<T> {
    /// Call a previously loaded function with `args`; returns its result.
    pub fn file_call_function(&mut self, handle: u16, args: &[u16]) -> Result<u16> {
        let count = run_len(Op::FileCallFunction, args.len())?;
        self.call_word(
            Op::FileCallFunction,
            &[Arg::Word(handle), Arg::Word(count), Arg::Words(args)],
        )
    }

    /// Number of files matching `pattern`.
    pub fn file_count(&mut self, pattern: &str) -> Result<u16> {
        self.text_word(Op::FileCount, pattern)
    }

    /// List files matching `pattern` on the display; returns the count.
    pub fn file_dir(&mut self, pattern: &str) -> Result<u16> {
        self.text_word(Op::FileDir, pattern)
    }

    pub fn file_erase(&mut self, name: &str) -> Result<u16> {
        self.text_word(Op::FileErase, name)
    }

    pub fn file_exists(&mut self, name: &str) -> Result<u16> {
        self.text_word(Op::FileExists, name)
    }

    pub fn file_find_first(&mut self, pattern: &str) -> Result<u16> {
        self.text_word(Op::FileFindFirst, pattern)
    }

    pub fn file_load_function(&mut self, name: &str) -> Result<u16> {
        self.text_word(Op::FileLoadFunction, name)
    }

    pub fn file_play_wav(&mut self, name: &str) -> Result<u16> {
        self.text_word(Op::FilePlayWav, name)
    }

    /// Run a program file and return to the caller when it exits.
    pub fn file_exec(&mut self, name: &str, args: &[u16]) -> Result<u16> {
        self.program(Op::FileExec, name, args)
    }

    /// Run a program file that replaces the current one.
    pub fn file_run(&mut self, name: &str, args: &[u16]) -> Result<u16> {
        self.program(Op::FileRun, name, args)
    }

    /// First file name matching `pattern`.
    pub fn file_find_first_ret(&mut self, pattern: &str) -> Result<String> {
        self.call_text(Op::FileFindFirstRet, &[Arg::Text(pattern)])
    }

    /// Next file name for the pattern given to [`file_find_first_ret`](Self::file_find_first_ret).
    pub fn file_find_next_ret(&mut self) -> Result<String> {
        self.call_text(Op::FileFindNextRet, &[])
    }

    /// Read a line of at most `size` bytes.
    pub fn file_get_s(&mut self, size: u16, handle: u16) -> Result<String> {
        self.call_text(Op::FileGetS, &[Arg::Word(size), Arg::Word(handle)])
    }

    pub fn file_load_image_control(
        &mut self,
        dat_name: &str,
        gci_name: &str,
        mode: u16,
    ) -> Result<u16> {
        self.call_word(
            Op::FileLoadImageControl,
            &[Arg::Text(dat_name), Arg::Text(gci_name), Arg::Word(mode)],
        )
    }

    /// Open `name` with mode `b'r'`, `b'w'` or `b'a'`; returns the handle, 0 on failure.
    pub fn file_open(&mut self, name: &str, mode: u8) -> Result<u16> {
        self.call_word(Op::FileOpen, &[Arg::Text(name), Arg::Byte(mode)])
    }

    pub fn file_put_s(&mut self, text: &str, handle: u16) -> Result<u16> {
        self.call_word(Op::FilePutS, &[Arg::Text(text), Arg::Word(handle)])
    }

    /// Read `size` bytes; returns the count read and exactly `size` bytes.
    pub fn file_read(&mut self, size: u16, handle: u16) -> Result<(u16, Bytes)> {
        self.call_blob(Op::FileRead, &[Arg::Word(size), Arg::Word(handle)])
    }

    pub fn file_size(&mut self, handle: u16) -> Result<FileSize> {
        self.call_word_two_words(Op::FileSize, &[Arg::Word(handle)])
            .map(FileSize::from_words)
    }

    /// Current read/write position.
    pub fn file_tell(&mut self, handle: u16) -> Result<FileSize> {
        self.call_word_two_words(Op::FileTell, &[Arg::Word(handle)])
            .map(FileSize::from_words)
    }

    /// Write `data`; returns the count written.
    pub fn file_write(&mut self, data: &[u8], handle: u16) -> Result<u16> {
        let count = run_len(Op::FileWrite, data.len())?;
        self.call_word(
            Op::FileWrite,
            &[Arg::Word(count), Arg::Bytes(data), Arg::Word(handle)],
        )
    }

    fn text_word(&mut self, op: Op, text: &str) -> Result<u16> {
        self.call_word(op, &[Arg::Text(text)])
    }

    fn program(&mut self, op: Op, name: &str, args: &[u16]) -> Result<u16> {
        let count = run_len(op, args.len())?;
        self.call_word(
            op,
            &[Arg::Text(name), Arg::Word(count), Arg::Words(args)],
        )
    }
}
