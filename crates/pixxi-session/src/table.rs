use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, SessionError};
use crate::ops::{ArgShape, OpDescriptor, ReplySpec};

macro_rules! operations {
    ($( $variant:ident => $name:literal, $opcode:literal, [$($arg:ident),*], $reply:ident $(($index:literal))?; )*) => {
        /// Every operation the display understands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Op {
            $($variant,)*
        }

        impl Op {
            /// All operations, in table order.
            pub const ALL: &'static [Op] = &[$(Op::$variant,)*];

            /// Wire-protocol name, e.g. `gfx_Circle`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Op::$variant => $name,)*
                }
            }

            /// Look up by wire-protocol name.
            pub fn from_name(name: &str) -> Option<Op> {
                match name {
                    $($name => Some(Op::$variant),)*
                    _ => None,
                }
            }
        }

        const BUILTIN: &[OpDescriptor] = &[
            $(OpDescriptor {
                op: Op::$variant,
                name: $name,
                opcode: $opcode,
                args: &[$(ArgShape::$arg),*],
                reply: ReplySpec::$reply $(($index))?,
            },)*
        ];
    };
}

// Default command codes. `file_LoadImageControl` has two argument forms on one code.
operations! {
    BusIn => "bus_In", 0xFFFF, [], AckWord;
    BusOut => "bus_Out", 0xFFFE, [Word], Ack;
    BusRead => "bus_Read", 0xFFFD, [], AckWord;
    BusSet => "bus_Set", 0xFFFC, [Word], Ack;
    BusWrite => "bus_Write", 0xFFFB, [Word], Ack;
    CharHeight => "charheight", 0xFFFA, [Byte], AckWord;
    CharWidth => "charwidth", 0xFFF9, [Byte], AckWord;
    FileCallFunction => "file_CallFunction", 0x0001, [Word, Count, Words], AckWord;
    FileClose => "file_Close", 0xFFF8, [Word], AckWord;
    FileCount => "file_Count", 0x0002, [Text], AckWord;
    FileDir => "file_Dir", 0x0003, [Text], AckWord;
    FileErase => "file_Erase", 0x0004, [Text], AckWord;
    FileError => "file_Error", 0xFFF7, [], AckWord;
    FileExec => "file_Exec", 0x0005, [Text, Count, Words], AckWord;
    FileExists => "file_Exists", 0x0006, [Text], AckWord;
    FileFindFirst => "file_FindFirst", 0x0007, [Text], AckWord;
    FileFindFirstRet => "file_FindFirstRet", 0x0008, [Text], Text;
    FileFindNext => "file_FindNext", 0xFFF6, [], AckWord;
    FileFindNextRet => "file_FindNextRet", 0x0009, [], Text;
    FileGetC => "file_GetC", 0xFFF5, [Word], AckWord;
    FileGetS => "file_GetS", 0x000A, [Word, Word], Text;
    FileGetW => "file_GetW", 0xFFF4, [Word], AckWord;
    FileImage => "file_Image", 0xFFF3, [Word, Word, Word], AckWord;
    FileIndex => "file_Index", 0xFFF2, [Word, Word, Word, Word], AckWord;
    FileLoadFunction => "file_LoadFunction", 0x000B, [Text], AckWord;
    FileLoadImageControl => "file_LoadImageControl", 0x000C, [Text, Text, Word], AckWord;
    FileLoadImageControlOffset => "file_LoadImageControlOffset", 0x000C, [Word, Word, Word], AckWord;
    FileMount => "file_Mount", 0xFFF1, [], AckWord;
    FileOpen => "file_Open", 0x000D, [Text, Byte], AckWord;
    FilePlayWav => "file_PlayWAV", 0x000E, [Text], AckWord;
    FilePutC => "file_PutC", 0xFFF0, [Word, Word], AckWord;
    FilePutS => "file_PutS", 0x000F, [Text, Word], AckWord;
    FilePutW => "file_PutW", 0xFFEF, [Word, Word], AckWord;
    FileRead => "file_Read", 0xFFEE, [Word, Word], DataSizedBy(0);
    FileRewind => "file_Rewind", 0xFFED, [Word], AckWord;
    FileRun => "file_Run", 0x0010, [Text, Count, Words], AckWord;
    FileScreenCapture => "file_ScreenCapture", 0xFFEC, [Word, Word, Word, Word, Word], AckWord;
    FileSeek => "file_Seek", 0xFFEB, [Word, Word, Word], AckWord;
    FileSize => "file_Size", 0xFFEA, [Word], AckWordTwoWords;
    FileTell => "file_Tell", 0xFFE9, [Word], AckWordTwoWords;
    FileUnmount => "file_Unmount", 0xFFE8, [], Ack;
    FileWrite => "file_Write", 0x0011, [Count, Bytes, Word], AckWord;
    GfxBevelShadow => "gfx_BevelShadow", 0xFFE7, [Word], AckWord;
    GfxBevelWidth => "gfx_BevelWidth", 0xFFE6, [Word], AckWord;
    GfxBGcolour => "gfx_BGcolour", 0xFFE5, [Word], AckWord;
    GfxButton => "gfx_Button", 0x0012, [Word, Word, Word, Word, Word, Word, Word, Word, Text], Ack;
    GfxChangeColour => "gfx_ChangeColour", 0xFFE4, [Word, Word], Ack;
    GfxCircle => "gfx_Circle", 0xFFE3, [Word, Word, Word, Word], Ack;
    GfxCircleFilled => "gfx_CircleFilled", 0xFFE2, [Word, Word, Word, Word], Ack;
    GfxClipping => "gfx_Clipping", 0xFFE1, [Word], Ack;
    GfxClipWindow => "gfx_ClipWindow", 0xFFE0, [Word, Word, Word, Word], Ack;
    GfxCls => "gfx_Cls", 0xFFDF, [], Ack;
    GfxContrast => "gfx_Contrast", 0xFFDE, [Word], AckWord;
    GfxEllipse => "gfx_Ellipse", 0xFFDD, [Word, Word, Word, Word, Word], Ack;
    GfxEllipseFilled => "gfx_EllipseFilled", 0xFFDC, [Word, Word, Word, Word, Word], Ack;
    GfxFrameDelay => "gfx_FrameDelay", 0xFFDB, [Word], AckWord;
    GfxGet => "gfx_Get", 0xFFDA, [Word], AckWord;
    GfxGetPixel => "gfx_GetPixel", 0xFFD9, [Word, Word], AckWord;
    GfxLine => "gfx_Line", 0xFFD8, [Word, Word, Word, Word, Word], Ack;
    GfxLinePattern => "gfx_LinePattern", 0xFFD7, [Word], AckWord;
    GfxLineTo => "gfx_LineTo", 0xFFD6, [Word, Word], Ack;
    GfxMoveTo => "gfx_MoveTo", 0xFFD5, [Word, Word], Ack;
    GfxOrbit => "gfx_Orbit", 0xFFD4, [Word, Word], AckTwoWords;
    GfxOutlineColour => "gfx_OutlineColour", 0xFFD3, [Word], AckWord;
    GfxPanel => "gfx_Panel", 0xFFD2, [Word, Word, Word, Word, Word, Word], Ack;
    GfxPolygon => "gfx_Polygon", 0x0013, [Count, Words, Words, Word], Ack;
    GfxPolygonFilled => "gfx_PolygonFilled", 0x0014, [Count, Words, Words, Word], Ack;
    GfxPolyline => "gfx_Polyline", 0x0015, [Count, Words, Words, Word], Ack;
    GfxPutPixel => "gfx_PutPixel", 0xFFD1, [Word, Word, Word], Ack;
    GfxRectangle => "gfx_Rectangle", 0xFFD0, [Word, Word, Word, Word, Word], Ack;
    GfxRectangleFilled => "gfx_RectangleFilled", 0xFFCF, [Word, Word, Word, Word, Word], Ack;
    GfxScreenCopyPaste => "gfx_ScreenCopyPaste", 0xFFCE, [Word, Word, Word, Word, Word, Word], Ack;
    GfxScreenMode => "gfx_ScreenMode", 0xFFCD, [Word], AckWord;
    GfxSet => "gfx_Set", 0xFFCC, [Word, Word], Ack;
    GfxSetClipRegion => "gfx_SetClipRegion", 0xFFCB, [], Ack;
    GfxSlider => "gfx_Slider", 0xFFCA, [Word, Word, Word, Word, Word, Word, Word, Word], AckWord;
    GfxTransparency => "gfx_Transparency", 0xFFC9, [Word], AckWord;
    GfxTransparentColour => "gfx_TransparentColour", 0xFFC8, [Word], AckWord;
    GfxTriangle => "gfx_Triangle", 0xFFC7, [Word, Word, Word, Word, Word, Word, Word], Ack;
    GfxTriangleFilled => "gfx_TriangleFilled", 0xFFC6, [Word, Word, Word, Word, Word, Word, Word], Ack;
    GfxButton4 => "gfx_Button4", 0xFFC5, [Word, Word, Word], Ack;
    GfxSwitch => "gfx_Switch", 0xFFC4, [Word, Word, Word], Ack;
    GfxSlider5 => "gfx_Slider5", 0xFFC3, [Word, Word, Word], Ack;
    GfxDial => "gfx_Dial", 0xFFC2, [Word, Word, Word], Ack;
    GfxLed => "gfx_Led", 0xFFC1, [Word, Word, Word], Ack;
    GfxGauge => "gfx_Gauge", 0xFFC0, [Word, Word, Word], Ack;
    GfxAngularMeter => "gfx_AngularMeter", 0xFFBF, [Word, Word, Word], Ack;
    GfxLedDigits => "gfx_LedDigits", 0xFFBE, [Word, Word, Word], Ack;
    GfxRulerGauge => "gfx_RulerGauge", 0xFFBD, [Word, Word, Word], Ack;
    GfxLedDigit => "gfx_LedDigit", 0xFFBC, [Word, Word, Word, Word, Word, Word], Ack;
    ImgClearAttributes => "img_ClearAttributes", 0xFFBB, [Word, Word, Word], AckWord;
    ImgDarken => "img_Darken", 0xFFBA, [Word, Word], AckWord;
    ImgDisable => "img_Disable", 0xFFB9, [Word, Word], AckWord;
    ImgEnable => "img_Enable", 0xFFB8, [Word, Word], AckWord;
    ImgFunctionCall => "img_FunctionCall", 0xFFB7, [Word, Word, Word, Word, Word, Word, Word], Ack;
    ImgGetWord => "img_GetWord", 0xFFB6, [Word, Word, Word], AckWord;
    ImgLighten => "img_Lighten", 0xFFB5, [Word, Word], AckWord;
    ImgSetAttributes => "img_SetAttributes", 0xFFB4, [Word, Word, Word], AckWord;
    ImgSetPosition => "img_SetPosition", 0xFFB3, [Word, Word, Word, Word], AckWord;
    ImgSetWord => "img_SetWord", 0xFFB2, [Word, Word, Word, Word], AckWord;
    ImgShow => "img_Show", 0xFFB1, [Word, Word], AckWord;
    ImgTouched => "img_Touched", 0xFFB0, [Word, Word], AckWord;
    MediaFlush => "media_Flush", 0xFFAF, [], AckWord;
    MediaImage => "media_Image", 0xFFAE, [Word, Word], Ack;
    MediaInit => "media_Init", 0xFFAD, [], AckWord;
    MediaRdSector => "media_RdSector", 0xFFAC, [], Sector;
    MediaReadByte => "media_ReadByte", 0xFFAB, [], AckWord;
    MediaReadWord => "media_ReadWord", 0xFFAA, [], AckWord;
    MediaSetAdd => "media_SetAdd", 0xFFA9, [Word, Word], Ack;
    MediaSetSector => "media_SetSector", 0xFFA8, [Word, Word], Ack;
    MediaVideo => "media_Video", 0xFFA7, [Word, Word], Ack;
    MediaVideoFrame => "media_VideoFrame", 0xFFA6, [Word, Word, Word], Ack;
    MediaWriteByte => "media_WriteByte", 0xFFA5, [Word], AckWord;
    MediaWriteWord => "media_WriteWord", 0xFFA4, [Word], AckWord;
    MediaWrSector => "media_WrSector", 0x0016, [Sector], AckWord;
    MemAlloc => "mem_Alloc", 0xFFA3, [Word], AckWord;
    MemFree => "mem_Free", 0xFFA2, [Word], AckWord;
    MemHeap => "mem_Heap", 0xFFA1, [], AckWord;
    PeekM => "peekM", 0xFFA0, [Word], AckWord;
    PinHi => "pin_HI", 0xFF9F, [Word], AckWord;
    PinLo => "pin_LO", 0xFF9E, [Word], AckWord;
    PinRead => "pin_Read", 0xFF9D, [Word], AckWord;
    PinSet => "pin_Set", 0xFF9C, [Word, Word], AckWord;
    PokeM => "pokeM", 0xFF9B, [Word, Word], Ack;
    PutCh => "putCH", 0xFF9A, [Word], Ack;
    PutStr => "putstr", 0x0017, [Text], AckWord;
    SndBufSize => "snd_BufSize", 0xFF99, [Word], Ack;
    SndContinue => "snd_Continue", 0xFF98, [], Ack;
    SndPause => "snd_Pause", 0xFF97, [], Ack;
    SndPitch => "snd_Pitch", 0xFF96, [Word], AckWord;
    SndPlaying => "snd_Playing", 0xFF95, [], AckWord;
    SndStop => "snd_Stop", 0xFF94, [], Ack;
    SndVolume => "snd_Volume", 0xFF93, [Word], Ack;
    SysSleep => "sys_Sleep", 0xFF92, [Word], AckWord;
    SysGetModel => "sys_GetModel", 0x0018, [], Text;
    SysGetVersion => "sys_GetVersion", 0xFF91, [], AckWord;
    SysGetPmmC => "sys_GetPmmC", 0xFF90, [], AckWord;
    TouchDetectRegion => "touch_DetectRegion", 0xFF8F, [Word, Word, Word, Word], Ack;
    TouchGet => "touch_Get", 0xFF8E, [Word], AckWord;
    TouchSet => "touch_Set", 0xFF8D, [Word], Ack;
    TxtAttributes => "txt_Attributes", 0xFF8C, [Word], AckWord;
    TxtBGcolour => "txt_BGcolour", 0xFF8B, [Word], AckWord;
    TxtBold => "txt_Bold", 0xFF8A, [Word], AckWord;
    TxtFGcolour => "txt_FGcolour", 0xFF89, [Word], AckWord;
    TxtFontID => "txt_FontID", 0xFF88, [Word], AckWord;
    TxtHeight => "txt_Height", 0xFF87, [Word], AckWord;
    TxtInverse => "txt_Inverse", 0xFF86, [Word], AckWord;
    TxtItalic => "txt_Italic", 0xFF85, [Word], AckWord;
    TxtMoveCursor => "txt_MoveCursor", 0xFF84, [Word, Word], Ack;
    TxtOpacity => "txt_Opacity", 0xFF83, [Word], AckWord;
    TxtSet => "txt_Set", 0xFF82, [Word, Word], Ack;
    TxtUnderline => "txt_Underline", 0xFF81, [Word], AckWord;
    TxtWidth => "txt_Width", 0xFF80, [Word], AckWord;
    TxtWrap => "txt_Wrap", 0xFF7F, [Word], AckWord;
    TxtXgap => "txt_Xgap", 0xFF7E, [Word], AckWord;
    TxtYgap => "txt_Ygap", 0xFF7D, [Word], AckWord;
    BlitComToDisplay => "blitComtoDisplay", 0x0019, [Word, Word, Word, Word, Pixels], Ack;
    ReadString => "readString", 0x001A, [Word], Text;
    WriteString => "writeString", 0x001B, [Word, Text], AckWord;
    StrPtr => "str_Ptr", 0xFF7C, [Word], AckWord;
    SendWordArrayToRam => "SendWordArrayToRAM", 0x001C, [Word, Count, Words], Ack;
    SendByteArrayToRam => "SendByteArrayToRAM", 0x001D, [Word, Count, Bytes], Ack;
    WidgetCreate => "widget_Create", 0xFF7B, [Word], AckWord;
    WidgetAdd => "widget_Add", 0xFF7A, [Word, Word, Word], Ack;
    WidgetDelete => "widget_Delete", 0xFF79, [Word, Word], Ack;
    WidgetRealloc => "widget_Realloc", 0xFF78, [Word, Word], AckWord;
    WidgetSetWord => "widget_SetWord", 0xFF77, [Word, Word, Word, Word], AckWord;
    WidgetGetWord => "widget_GetWord", 0xFF76, [Word, Word, Word], AckWord;
    WidgetSetPosition => "widget_SetPosition", 0xFF75, [Word, Word, Word, Word], AckWord;
    WidgetEnable => "widget_Enable", 0xFF74, [Word, Word], AckWord;
    WidgetDisable => "widget_Disable", 0xFF73, [Word, Word], AckWord;
    WidgetTouched => "widget_Touched", 0xFF72, [Word, Word], AckWord;
    WidgetSetAttributes => "widget_SetAttributes", 0xFF71, [Word, Word, Word], AckWord;
    WidgetClearAttributes => "widget_ClearAttributes", 0xFF70, [Word, Word, Word], AckWord;
    WidgetInitGradRam => "widget_InitGradRAM", 0xFF6F, [Word], Ack;
}

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Name to opcode replacements, e.g. `{"gfx_Cls": "0xFFD7", "sys_Sleep": 65326}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct OpcodeOverrides(BTreeMap<String, OpcodeValue>);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OpcodeValue {
    Number(u64),
    Text(String),
}

impl OpcodeOverrides {
    /// Parse an override document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn resolved(&self) -> Result<Vec<(Op, u16)>> {
        self.0
            .iter()
            .map(|(name, value)| {
                let op = Op::from_name(name)
                    .ok_or_else(|| SessionError::UnknownOperation(name.clone()))?;
                let opcode = parse_opcode(value).ok_or_else(|| SessionError::InvalidOpcode {
                    name: name.clone(),
                    value: match value {
                        OpcodeValue::Number(n) => n.to_string(),
                        OpcodeValue::Text(s) => s.clone(),
                    },
                })?;
                Ok((op, opcode))
            })
            .collect()
    }
}

fn parse_opcode(value: &OpcodeValue) -> Option<u16> {
    match value {
        OpcodeValue::Number(n) => u16::try_from(*n).ok(),
        OpcodeValue::Text(text) => {
            let text = text.trim();
            match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                Some(hex) => u16::from_str_radix(hex, 16).ok(),
                None => text.parse().ok(),
            }
        }
    }
}

/// The operation descriptors a session dispatches through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTable {
    entries: Vec<OpDescriptor>,
}

impl Default for OperationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OperationTable {
    /// The built-in command set.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.to_vec(),
        }
    }

    /// The built-in command set with `overrides` applied.
    pub fn with_overrides(overrides: &OpcodeOverrides) -> Result<Self> {
        let mut table = Self::builtin();
        table.apply(overrides)?;
        Ok(table)
    }

    /// Replace opcodes in place. Nothing changes if any entry is invalid.
    pub fn apply(&mut self, overrides: &OpcodeOverrides) -> Result<()> {
        for (op, opcode) in overrides.resolved()? {
            self.set_opcode(op, opcode);
        }
        Ok(())
    }

    pub fn set_opcode(&mut self, op: Op, opcode: u16) {
        self.entries[op as usize].opcode = opcode;
    }

    pub fn get(&self, op: Op) -> &OpDescriptor {
        &self.entries[op as usize]
    }

    pub fn lookup(&self, name: &str) -> Option<&OpDescriptor> {
        Op::from_name(name).map(|op| self.get(op))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn table_is_indexed_by_op() {
        let table = OperationTable::builtin();
        assert_eq!(table.len(), Op::ALL.len());
        for (index, op) in Op::ALL.iter().enumerate() {
            assert_eq!(*op as usize, index);
            assert_eq!(table.get(*op).op, *op);
        }
    }

    #[test]
    fn names_roundtrip() {
        for op in Op::ALL {
            assert_eq!(Op::from_name(op.name()), Some(*op));
        }
        assert_eq!(Op::from_name("gfx_Nothing"), None);
    }

    #[test]
    fn opcodes_are_unique_except_shared_form() {
        let mut seen: HashMap<u16, &str> = HashMap::new();
        for entry in OperationTable::builtin().iter() {
            if let Some(previous) = seen.insert(entry.opcode, entry.name) {
                assert_eq!(
                    (previous, entry.name),
                    ("file_LoadImageControl", "file_LoadImageControlOffset"),
                    "duplicate opcode 0x{:04X}",
                    entry.opcode
                );
            }
        }
    }

    #[test]
    fn runs_follow_a_count() {
        for entry in OperationTable::builtin().iter() {
            let mut counted = false;
            for shape in entry.args {
                match shape {
                    ArgShape::Count => counted = true,
                    ArgShape::Words | ArgShape::Bytes => {
                        assert!(counted, "{} has an uncounted run", entry.name)
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn supplemented_shapes_are_wired() {
        let table = OperationTable::builtin();
        assert_eq!(table.get(Op::FileSize).reply, ReplySpec::AckWordTwoWords);
        assert_eq!(table.get(Op::FileTell).reply, ReplySpec::AckWordTwoWords);
        assert_eq!(table.get(Op::GfxOrbit).reply, ReplySpec::AckTwoWords);
        assert_eq!(table.get(Op::FileRead).reply, ReplySpec::DataSizedBy(0));
        assert_eq!(table.get(Op::MediaRdSector).reply, ReplySpec::Sector);
        assert_eq!(table.get(Op::SysGetModel).reply, ReplySpec::Text);
    }

    #[test]
    fn overrides_accept_numbers_and_hex() {
        let overrides =
            OpcodeOverrides::from_json(r#"{"gfx_Cls": "0x1234", "sys_Sleep": 65000, "putCH": "42"}"#)
                .unwrap();
        let table = OperationTable::with_overrides(&overrides).unwrap();

        assert_eq!(table.get(Op::GfxCls).opcode, 0x1234);
        assert_eq!(table.get(Op::SysSleep).opcode, 65000);
        assert_eq!(table.get(Op::PutCh).opcode, 42);
    }

    #[test]
    fn overrides_reject_bad_entries_atomically() {
        let mut table = OperationTable::builtin();
        let before = table.clone();

        let unknown = OpcodeOverrides::from_json(r#"{"gfx_Cls": 1, "gfx_Nope": 2}"#).unwrap();
        assert!(matches!(
            table.apply(&unknown),
            Err(SessionError::UnknownOperation(name)) if name == "gfx_Nope"
        ));

        let too_big = OpcodeOverrides::from_json(r#"{"gfx_Cls": 70000}"#).unwrap();
        assert!(matches!(
            table.apply(&too_big),
            Err(SessionError::InvalidOpcode { .. })
        ));

        assert_eq!(table, before);
    }

    #[test]
    fn descriptor_serializes_by_name() {
        let table = OperationTable::builtin();
        let json = serde_json::to_value(table.get(Op::GfxPolygon)).unwrap();
        assert_eq!(json["name"], "gfx_Polygon");
        assert_eq!(json["args"][0], "count");
        assert_eq!(json["reply"], "ack");
        assert!(json.get("op").is_none());

        let json = serde_json::to_value(table.get(Op::FileRead)).unwrap();
        assert_eq!(json["reply"]["data_sized_by"], 0);
    }
}
