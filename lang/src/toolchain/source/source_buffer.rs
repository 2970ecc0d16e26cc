use bstr::BStr;
use mmap_rs;
use std::fs::File;

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { string: &'a str },
}

/// ObjectScript source text paired with the name it was loaded from, so both share a lifetime.
///
/// File-backed buffers are not validated as utf-8 here; the scanner cursor checks every
/// codepoint as it consumes them.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'_>, mmap_rs::Error> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let buffer =
            unsafe { mmap_rs::MmapOptions::new(len.try_into().unwrap())?.with_file(&file, 0).map()? };
        let file_name = String::from(file_path.to_string_lossy());
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> Result<SourceBuffer<'a>, mmap_rs::Error> {
        let file_name = String::from(name);
        Ok(SourceBuffer { kind: SourceBufferKind::Memory { string }, file_name })
    }

    pub fn code(&self) -> &BStr {
        match &self.kind {
            SourceBufferKind::File { buffer } => BStr::new(buffer.as_slice()),
            SourceBufferKind::Memory { string } => BStr::new(*string),
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}
