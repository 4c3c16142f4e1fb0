use crate::io::OutputStream;

// Enforces no structural rules: the caller must supply the announced number
// of elements or payload bytes, and pair indefinite openers with a break
pub struct Writer<W> {
    out: W,
}

impl<W: OutputStream> Writer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit_uint_minor(&mut self, major: u8, val: u64) -> usize {
        if val < 24 {
            self.out.write((major << 5) | (val as u8));
            1
        } else if val <= u8::MAX as u64 {
            self.out.write((major << 5) | 24);
            self.out.write(val as u8);
            2
        } else if val <= u16::MAX as u64 {
            self.out.write((major << 5) | 25);
            self.out.write_bytes(&(val as u16).to_be_bytes());
            3
        } else if val <= u32::MAX as u64 {
            self.out.write((major << 5) | 26);
            self.out.write_bytes(&(val as u32).to_be_bytes());
            5
        } else {
            self.out.write((major << 5) | 27);
            self.out.write_bytes(&val.to_be_bytes());
            9
        }
    }

    pub fn emit_unsigned(&mut self, val: u64) -> usize {
        self.emit_uint_minor(0, val)
    }

    pub fn emit_integer(&mut self, val: i64) -> usize {
        // val >> 63 is all ones exactly for negatives: selects major type 1
        // and complements the magnitude to -1 - val
        let mask = (val >> 63) as u64;
        self.emit_uint_minor((mask & 1) as u8, mask ^ val as u64)
    }

    pub fn emit_tag(&mut self, tag: u64) -> usize {
        self.emit_uint_minor(6, tag)
    }

    pub fn emit_boolean(&mut self, val: bool) -> usize {
        self.out.write((7 << 5) | if val { 21 } else { 20 });
        1
    }

    pub fn emit_null(&mut self) -> usize {
        self.out.write((7 << 5) | 22);
        1
    }

    pub fn emit_undefined(&mut self) -> usize {
        self.out.write((7 << 5) | 23);
        1
    }

    pub fn emit_simple_value(&mut self, val: u8) -> usize {
        // No validation: 24..=31 produce a two-byte head that will not decode
        if val < 24 {
            self.out.write((7 << 5) | val);
            1
        } else {
            self.out.write((7 << 5) | 24);
            self.out.write(val);
            2
        }
    }

    pub fn emit_float(&mut self, val: f32) -> usize {
        self.out.write((7 << 5) | 26);
        self.out.write_bytes(&val.to_be_bytes());
        5
    }

    pub fn emit_double(&mut self, val: f64) -> usize {
        self.out.write((7 << 5) | 27);
        self.out.write_bytes(&val.to_be_bytes());
        9
    }

    pub fn begin_bytes(&mut self, count: Option<u64>) -> usize {
        self.begin_sequence(2, count)
    }

    pub fn begin_text(&mut self, count: Option<u64>) -> usize {
        self.begin_sequence(3, count)
    }

    pub fn begin_array(&mut self, count: Option<u64>) -> usize {
        self.begin_sequence(4, count)
    }

    pub fn begin_map(&mut self, count: Option<u64>) -> usize {
        self.begin_sequence(5, count)
    }

    fn begin_sequence(&mut self, major: u8, count: Option<u64>) -> usize {
        match count {
            Some(count) => self.emit_uint_minor(major, count),
            None => {
                self.out.write((major << 5) | 31);
                1
            }
        }
    }

    pub fn end_indefinite(&mut self) -> usize {
        self.out.write(0xFF);
        1
    }

    pub fn emit_raw(&mut self, data: &[u8]) -> usize {
        self.out.write_bytes(data);
        data.len()
    }
}
