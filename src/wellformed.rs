use crate::io::InputStream;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Malformed data item")]
pub struct Malformed;

pub const DEFAULT_MAX_RECURSION: usize = 256;

enum Item {
    Major(u8),
    Break,
}

// Destructive: consumed bytes are gone from the stream, even on failure.
// A byte that is not yet available counts as truncation.
pub fn check<I: InputStream>(input: &mut I, max_recursion: usize) -> Result<u8, Malformed> {
    check_item(input, max_recursion)
}

pub fn is_well_formed<I: InputStream>(input: &mut I) -> bool {
    check(input, DEFAULT_MAX_RECURSION).is_ok()
}

fn read_argument<I: InputStream>(input: &mut I, len: usize) -> Result<u64, Malformed> {
    let mut val = 0;
    for _ in 0..len {
        val = (val << 8) | u64::from(input.read().ok_or(Malformed)?);
    }
    Ok(val)
}

fn check_item<I: InputStream>(input: &mut I, max_recursion: usize) -> Result<u8, Malformed> {
    let initial = input.read().ok_or(Malformed)?;
    check_rest(input, initial, max_recursion)
}

// Checks the remainder of an item whose initial byte is already consumed
fn check_rest<I: InputStream>(
    input: &mut I,
    initial: u8,
    max_recursion: usize,
) -> Result<u8, Malformed> {
    let major = initial >> 5;
    let addl = initial & 0x1F;

    let mut val = match addl {
        24 => read_argument(input, 1)?,
        25 => read_argument(input, 2)?,
        26 => read_argument(input, 4)?,
        27 => read_argument(input, 8)?,
        28..=30 => return Err(Malformed),
        31 => return check_indefinite(input, major, max_recursion),
        addl => addl as u64,
    };
    if major == 7 && addl == 24 && val < 32 {
        return Err(Malformed);
    }

    match major {
        2 | 3 => {
            // String payloads are consumed, not inspected
            for _ in 0..val {
                input.read().ok_or(Malformed)?;
            }
        }
        4 | 5 => {
            if major == 5 {
                // 2n pairs must stay enumerable in 64 bits
                if val != 0 && val.wrapping_mul(2) <= val {
                    return Err(Malformed);
                }
                val *= 2;
            }
            if val != 0 && max_recursion == 0 {
                return Err(Malformed);
            }
            for _ in 0..val {
                check_item(input, max_recursion - 1)?;
            }
        }
        6 => {
            if max_recursion == 0 {
                return Err(Malformed);
            }
            check_item(input, max_recursion - 1)?;
        }
        _ => {} // No content for majors 0, 1 and 7
    }

    Ok(major)
}

// Probes the next item of an indefinite container. The terminating break
// is the container's own, not a nested item, and costs no depth
fn check_child<I: InputStream>(input: &mut I, max_recursion: usize) -> Result<Item, Malformed> {
    let initial = input.read().ok_or(Malformed)?;
    if initial == 0xFF {
        return Ok(Item::Break);
    }
    if max_recursion == 0 {
        return Err(Malformed);
    }
    check_rest(input, initial, max_recursion - 1).map(Item::Major)
}

fn check_indefinite<I: InputStream>(
    input: &mut I,
    major: u8,
    max_recursion: usize,
) -> Result<u8, Malformed> {
    match major {
        2 | 3 => loop {
            // Chunks must carry the enclosing string's major type
            match check_child(input, max_recursion)? {
                Item::Break => break,
                Item::Major(m) if m == major => (),
                Item::Major(_) => return Err(Malformed),
            }
        },
        4 => loop {
            if let Item::Break = check_child(input, max_recursion)? {
                break;
            }
        },
        5 => loop {
            // A break is legal in key position only
            if let Item::Break = check_child(input, max_recursion)? {
                break;
            }
            if max_recursion == 0 {
                return Err(Malformed);
            }
            check_item(input, max_recursion - 1)?;
        },
        7 => return Err(Malformed), // A bare break only terminates an indefinite container
        _ => return Err(Malformed), // Integers and tags have no indefinite form
    }

    Ok(major)
}
