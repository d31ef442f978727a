//! Builder for small SerializedFile containers used by the integration tests
#![allow(dead_code)]

use sceneloc::formats::ScriptCipher;

pub const TEXT_ASSET: i32 = 49;
pub const TEXTURE_2D: i32 = 28;
pub const MONO_BEHAVIOUR: i32 = 114;

/// Growable buffer that knows the absolute file offset it starts at
struct Buf {
    bytes: Vec<u8>,
    base: usize,
    big_endian: bool,
}

impl Buf {
    fn new(base: usize, big_endian: bool) -> Self {
        Self {
            bytes: Vec::new(),
            base,
            big_endian,
        }
    }

    fn raw(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    fn u8(&mut self, v: u8) {
        self.bytes.push(v);
    }

    fn i16(&mut self, v: i16) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.raw(&b);
    }

    fn u16(&mut self, v: u16) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.raw(&b);
    }

    fn i32(&mut self, v: i32) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.raw(&b);
    }

    fn u32(&mut self, v: u32) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.raw(&b);
    }

    fn i64(&mut self, v: i64) {
        let b = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.raw(&b);
    }

    fn cstring(&mut self, s: &str) {
        self.raw(s.as_bytes());
        self.u8(0);
    }

    fn align(&mut self, alignment: usize) {
        while (self.base + self.bytes.len()) % alignment != 0 {
            self.u8(0);
        }
    }
}

/// Encode a `TextAsset` object body.
pub fn text_asset_body(name: &str, script: &[u8], big_endian: bool) -> Vec<u8> {
    let mut b = Buf::new(0, big_endian);
    b.i32(name.len() as i32);
    b.raw(name.as_bytes());
    b.align(4);
    b.i32(script.len() as i32);
    b.raw(script);
    b.align(4);
    b.bytes
}

struct Object {
    path_id: i64,
    class_id: i32,
    data: Vec<u8>,
}

/// SerializedFile builder
pub struct AssetsBuilder {
    version: u32,
    big_endian: bool,
    type_tree: bool,
    objects: Vec<Object>,
}

impl AssetsBuilder {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            big_endian: false,
            type_tree: false,
            objects: Vec::new(),
        }
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn with_type_tree(mut self) -> Self {
        self.type_tree = true;
        self
    }

    pub fn object(mut self, path_id: i64, class_id: i32, data: Vec<u8>) -> Self {
        self.objects.push(Object { path_id, class_id, data });
        self
    }

    pub fn text_asset(self, path_id: i64, name: &str, script: &[u8]) -> Self {
        let body = text_asset_body(name, script, self.big_endian);
        self.object(path_id, TEXT_ASSET, body)
    }

    /// A scene whose script is `plaintext` encrypted with the script key.
    pub fn scene(self, path_id: i64, name: &str, plaintext: &str) -> Self {
        let envelope = ScriptCipher::default().encrypt(plaintext);
        self.text_asset(path_id, name, envelope.as_bytes())
    }

    pub fn build(&self) -> Vec<u8> {
        let v = self.version;
        let header_size = if v >= 22 { 48 } else { 20 };

        let mut class_ids: Vec<i32> = Vec::new();
        for object in &self.objects {
            if !class_ids.contains(&object.class_id) {
                class_ids.push(object.class_id);
            }
        }

        // Data section layout, relative offsets
        let mut data = Buf::new(0, self.big_endian);
        let mut placements = Vec::new();
        for object in &self.objects {
            data.align(8);
            placements.push(data.bytes.len());
            data.raw(&object.data);
        }

        let mut meta = Buf::new(header_size, self.big_endian);
        meta.cstring("2019.4.40f1");
        meta.i32(19);
        meta.u8(u8::from(self.type_tree));

        meta.i32(class_ids.len() as i32);
        for &class_id in &class_ids {
            meta.i32(class_id);
            if v >= 16 {
                meta.u8(0);
            }
            if v >= 17 {
                meta.i16(if class_id == MONO_BEHAVIOUR { 0 } else { -1 });
            }
            if (v < 16 && class_id < 0) || (v >= 16 && class_id == MONO_BEHAVIOUR) {
                meta.raw(&[0xAB; 16]);
            }
            meta.raw(&[0xCD; 16]);
            if self.type_tree {
                let node_size = if v >= 19 { 32 } else { 24 };
                meta.i32(1);
                meta.i32(4);
                meta.raw(&vec![0x11; node_size]);
                meta.raw(b"Base");
                if v >= 21 {
                    meta.i32(0);
                }
            }
        }

        meta.i32(self.objects.len() as i32);
        for (object, &start) in self.objects.iter().zip(&placements) {
            meta.align(4);
            meta.i64(object.path_id);
            if v >= 22 {
                meta.i64(start as i64);
            } else {
                meta.u32(start as u32);
            }
            meta.u32(object.data.len() as u32);
            let type_index = class_ids.iter().position(|&c| c == object.class_id).unwrap_or(0);
            if v < 16 {
                meta.i32(object.class_id);
                meta.u16(object.class_id as u16);
            } else {
                meta.i32(type_index as i32);
            }
            if v < 17 {
                meta.i16(-1);
            }
            if v == 15 || v == 16 {
                meta.u8(0);
            }
        }

        // Script types and externals, both empty
        meta.i32(0);
        meta.i32(0);
        if v >= 20 {
            meta.i32(0);
        }
        meta.cstring("");

        let metadata_size = meta.bytes.len();
        let mut data_offset = header_size + metadata_size;
        data_offset += (16 - data_offset % 16) % 16;
        let file_size = data_offset + data.bytes.len();

        let mut out = Vec::with_capacity(file_size);
        if v >= 22 {
            out.extend_from_slice(&0u32.to_be_bytes());
            out.extend_from_slice(&0u32.to_be_bytes());
            out.extend_from_slice(&v.to_be_bytes());
            out.extend_from_slice(&0u32.to_be_bytes());
            out.push(u8::from(self.big_endian));
            out.extend_from_slice(&[0; 3]);
            out.extend_from_slice(&(metadata_size as u32).to_be_bytes());
            out.extend_from_slice(&(file_size as u64).to_be_bytes());
            out.extend_from_slice(&(data_offset as u64).to_be_bytes());
            out.extend_from_slice(&0u64.to_be_bytes());
        } else {
            out.extend_from_slice(&(metadata_size as u32).to_be_bytes());
            out.extend_from_slice(&(file_size as u32).to_be_bytes());
            out.extend_from_slice(&v.to_be_bytes());
            out.extend_from_slice(&(data_offset as u32).to_be_bytes());
            out.push(u8::from(self.big_endian));
            out.extend_from_slice(&[0; 3]);
        }
        out.extend_from_slice(&meta.bytes);
        out.resize(data_offset, 0);
        out.extend_from_slice(&data.bytes);
        out
    }
}

/// Standard two-language fixture: EN and ZH town scenes plus a texture.
pub fn town_assets(version: u32) -> Vec<u8> {
    AssetsBuilder::new(version)
        .scene(1, "EN_Town", r#"<entry name="A">hi</entry><entry name="B"></entry>"#)
        .object(2, TEXTURE_2D, vec![7; 13])
        .scene(3, "ZH_Town", r#"<entry name="A">你好</entry><entry name="B"></entry>"#)
        .text_asset(4, "Credits", b"plain text, not encrypted")
        .build()
}
