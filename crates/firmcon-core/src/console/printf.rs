//! printf-family formatting engine.
//!
//! A single recursive-descent format-string interpreter shared by every
//! render mode: literal passthrough, `-`/`#`/`0` flags, minimum field
//! width, `l`/`ll` length modifiers, and the `s d i u x X p P c`
//! conversions. The destination is abstracted behind a per-byte sink, so
//! the conversion logic never knows whether it is filling a caller buffer
//! with strict truncation semantics or streaming unbounded output to the
//! device through the 256-byte staging buffer.
//!
//! Malformed format strings are best-effort by design: a directive
//! truncated at end-of-string stops rendering silently, and an unrecognized
//! conversion character is consumed and dropped. There is no error channel.
//!
//! Every entry point returns the number of bytes the rendering *would*
//! have produced; truncation never affects the count.

use super::{Stage, cstr_len, lock_output};
use crate::halt::halt;

/// Digit-reversal scratch buffer size. Sized for the widest representable
/// value in base 2 plus sign and alternate-form prefix.
const INT_BUF_LEN: usize = 64;

/// Typed argument value standing in for a C vararg.
///
/// The conversion specifier selects the operand width at each directive:
/// unqualified `%d`/`%u`/`%x` truncate to 32 bits, the `l`/`ll` qualified
/// forms and `%p` use the full value, mirroring C argument promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg<'a> {
    /// Signed integer operand (`%d`, `%i` and qualified forms).
    Int(i64),
    /// Unsigned integer operand (`%u`, `%x`, `%X` and qualified forms).
    Uint(u64),
    /// Pointer-sized operand (`%p`, `%P`).
    Ptr(usize),
    /// Single character operand (`%c`).
    Char(u8),
    /// String operand (`%s`); rendering stops at the first NUL byte.
    Str(&'a [u8]),
    /// A null string pointer; `%s` renders it as the literal `(null)`.
    NullStr,
}

impl FormatArg<'_> {
    fn as_signed(self) -> i64 {
        match self {
            FormatArg::Int(v) => v,
            FormatArg::Uint(v) => v as i64,
            FormatArg::Ptr(v) => v as i64,
            FormatArg::Char(v) => v as i64,
            FormatArg::Str(_) | FormatArg::NullStr => 0,
        }
    }

    fn as_unsigned(self) -> u64 {
        match self {
            FormatArg::Int(v) => v as u64,
            FormatArg::Uint(v) => v,
            FormatArg::Ptr(v) => v as u64,
            FormatArg::Char(v) => v as u64,
            FormatArg::Str(_) | FormatArg::NullStr => 0,
        }
    }

    fn as_char(self) -> u8 {
        match self {
            FormatArg::Char(v) => v,
            FormatArg::Int(v) => v as u8,
            FormatArg::Uint(v) => v as u8,
            FormatArg::Ptr(v) => v as u8,
            FormatArg::Str(_) | FormatArg::NullStr => 0,
        }
    }
}

/// Flags parsed from one `%...` directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    /// `-`: pad on the right instead of the left.
    left_justify: bool,
    /// `0`: pad with zeros instead of spaces (leading padding only;
    /// ignored when left-justifying).
    zero_pad: bool,
    /// `#`: alternate form (`0x`/`0X` prefix for hex, bare `0` otherwise).
    alt_form: bool,
}

/// One fully parsed `%...` directive, discarded once rendered.
#[derive(Debug, Clone, Copy)]
struct Directive {
    flags: Flags,
    width: usize,
    /// `l` or `ll` length modifier was present.
    wide: bool,
    conversion: u8,
}

/// Parses a single directive. `fmt` points at the first byte after `%`.
///
/// Returns the directive (or `None` when it is unrecognized or truncated,
/// both dropped silently) and the number of bytes consumed from `fmt`.
fn parse_directive(fmt: &[u8]) -> (Option<Directive>, usize) {
    let mut pos = 0;

    let mut flags = Flags::default();
    while pos < fmt.len() {
        match fmt[pos] {
            b'-' => flags.left_justify = true,
            b'#' => flags.alt_form = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }

    let mut width = 0usize;
    while pos < fmt.len() && fmt[pos].is_ascii_digit() {
        width = width
            .saturating_mul(10)
            .saturating_add((fmt[pos] - b'0') as usize);
        pos += 1;
    }

    if pos >= fmt.len() {
        // Format string ended mid-directive.
        return (None, pos);
    }

    let mut wide = false;
    if fmt[pos] == b'l' {
        wide = true;
        pos += 1;
        if pos < fmt.len() && fmt[pos] == b'l' {
            pos += 1;
        }
        // A qualified conversion follows, or plain `%l` means signed
        // decimal of the wide operand and the next byte is not consumed.
        let conversion = match fmt.get(pos) {
            Some(&c) if c == b'u' || c == b'x' || c == b'X' => {
                pos += 1;
                c
            }
            Some(&c) if c == b'd' || c == b'i' => {
                pos += 1;
                b'd'
            }
            _ => b'd',
        };
        let directive = Directive {
            flags,
            width,
            wide,
            conversion,
        };
        return (Some(directive), pos);
    }

    let conversion = fmt[pos];
    pos += 1;
    match conversion {
        b's' | b'c' | b'd' | b'i' | b'u' | b'x' | b'X' | b'p' | b'P' => (
            Some(Directive {
                flags,
                width,
                wide,
                conversion,
            }),
            pos,
        ),
        // Unrecognized conversion: consumed and dropped.
        _ => (None, pos),
    }
}

/// Per-byte output destination shared by every conversion.
enum Sink<'a> {
    /// Caller buffer with no capacity limit applied by the entry point.
    /// Exhausting it is a caller contract violation and halts.
    Unbounded { out: &'a mut [u8], pos: usize },
    /// Caller buffer with strict truncation semantics: bytes are written
    /// while more than one slot remains, the buffer is kept NUL-terminated
    /// at all times, and counting continues past the truncation point.
    Bounded {
        out: &'a mut [u8],
        pos: usize,
        remaining: usize,
    },
    /// Device-routed: every byte goes through the staging buffer, which
    /// flushes itself transparently when full. The caller holds the
    /// console output lock.
    Staged { stage: &'a mut Stage },
}

impl<'a> Sink<'a> {
    fn unbounded(out: &'a mut [u8]) -> Self {
        if let Some(first) = out.first_mut() {
            *first = 0;
        }
        Sink::Unbounded { out, pos: 0 }
    }

    fn bounded(out: &'a mut [u8]) -> Self {
        let remaining = out.len();
        if let Some(first) = out.first_mut() {
            *first = 0;
        }
        Sink::Bounded {
            out,
            pos: 0,
            remaining,
        }
    }

    fn put(&mut self, byte: u8) {
        match self {
            Sink::Unbounded { out, pos } => {
                if *pos + 1 >= out.len() {
                    fatal(b"sprintf: destination buffer exhausted\n", &[]);
                }
                out[*pos] = byte;
                *pos += 1;
                out[*pos] = 0;
            }
            Sink::Bounded {
                out,
                pos,
                remaining,
            } => {
                if *remaining > 1 {
                    out[*pos] = byte;
                    *pos += 1;
                    out[*pos] = 0;
                }
                if *remaining > 0 {
                    *remaining -= 1;
                }
            }
            Sink::Staged { stage } => stage.push(byte),
        }
    }

    fn finish(self) {
        if let Sink::Staged { stage } = self {
            stage.flush();
        }
    }
}

/// Pads `content` to `width` and emits it. Shared by the string, character
/// and integer conversions.
///
/// Leading padding uses `0` when the zero-pad flag is set; trailing padding
/// (left-justified fields) is always spaces.
fn render_padded(sink: &mut Sink<'_>, content: &[u8], width: usize, flags: Flags) -> usize {
    let mut emitted = 0;
    let pad = width.saturating_sub(content.len());
    let pad_byte = if flags.zero_pad && !flags.left_justify {
        b'0'
    } else {
        b' '
    };

    if !flags.left_justify {
        for _ in 0..pad {
            sink.put(pad_byte);
            emitted += 1;
        }
    }
    for &byte in content {
        sink.put(byte);
        emitted += 1;
    }
    if flags.left_justify {
        for _ in 0..pad {
            sink.put(b' ');
            emitted += 1;
        }
    }
    emitted
}

/// Integer conversion: digits are produced least-significant-first by
/// repeated division into a fixed scratch buffer, then emitted as a slice.
///
/// For signed decimal negatives, a zero-padded field emits the `-` directly
/// and narrows the width by one so zeros fill between sign and digits
/// (`-00042`); otherwise the sign joins the digit buffer so space padding
/// lands before it (`   -42`).
fn render_int(
    sink: &mut Sink<'_>,
    value: i64,
    base: u64,
    signed: bool,
    mut width: usize,
    flags: Flags,
    upper: bool,
) -> usize {
    let mut emitted = 0;
    let negative = signed && base == 10 && value < 0;
    let mut magnitude = if negative {
        value.unsigned_abs()
    } else {
        value as u64
    };

    let mut scratch = [0u8; INT_BUF_LEN];
    let mut start = INT_BUF_LEN;

    if magnitude == 0 {
        start -= 1;
        scratch[start] = b'0';
    } else {
        let letter_base = if upper { b'A' } else { b'a' };
        while magnitude > 0 {
            let digit = (magnitude % base) as u8;
            magnitude /= base;
            start -= 1;
            scratch[start] = if digit < 10 {
                b'0' + digit
            } else {
                letter_base + (digit - 10)
            };
        }
    }

    if flags.alt_form {
        if base == 16 {
            start -= 1;
            scratch[start] = if upper { b'X' } else { b'x' };
        }
        start -= 1;
        scratch[start] = b'0';
    }

    if negative {
        if width > 0 && flags.zero_pad && !flags.left_justify {
            sink.put(b'-');
            emitted += 1;
            width -= 1;
        } else {
            start -= 1;
            scratch[start] = b'-';
        }
    }

    emitted + render_padded(sink, &scratch[start..], width, flags)
}

fn render_directive(sink: &mut Sink<'_>, directive: Directive, arg: FormatArg<'_>) -> usize {
    let Directive {
        flags,
        width,
        wide,
        conversion,
    } = directive;

    match conversion {
        b's' => {
            let s = match arg {
                FormatArg::Str(s) => &s[..cstr_len(s)],
                _ => &b"(null)"[..],
            };
            render_padded(sink, s, width, flags)
        }
        b'c' => {
            // A NUL character is an empty string: only padding is emitted.
            let scratch = [arg.as_char()];
            render_padded(sink, &scratch[..cstr_len(&scratch)], width, flags)
        }
        b'd' | b'i' => {
            let value = if wide {
                arg.as_signed()
            } else {
                arg.as_signed() as i32 as i64
            };
            render_int(sink, value, 10, true, width, flags, false)
        }
        b'u' => {
            let value = if wide {
                arg.as_unsigned()
            } else {
                arg.as_unsigned() as u32 as u64
            };
            render_int(sink, value as i64, 10, false, width, flags, false)
        }
        b'x' | b'X' => {
            let value = if wide {
                arg.as_unsigned()
            } else {
                arg.as_unsigned() as u32 as u64
            };
            render_int(sink, value as i64, 16, false, width, flags, conversion == b'X')
        }
        b'p' | b'P' => {
            let value = arg.as_unsigned() as usize as u64;
            render_int(sink, value as i64, 16, false, width, flags, conversion == b'P')
        }
        // parse_directive admits nothing else.
        _ => 0,
    }
}

/// The interpreter proper: walks `format` left to right, copying literals
/// and resolving one directive (and one argument) at a time.
fn format_into(sink: &mut Sink<'_>, format: &[u8], args: &[FormatArg<'_>]) -> usize {
    let format = &format[..cstr_len(format)];
    let mut args = args.iter().copied();
    let mut count = 0;
    let mut pos = 0;

    while pos < format.len() {
        let byte = format[pos];
        pos += 1;

        if byte != b'%' {
            sink.put(byte);
            count += 1;
            continue;
        }
        if pos >= format.len() {
            // Trailing '%' is dropped.
            break;
        }
        if format[pos] == b'%' {
            sink.put(b'%');
            count += 1;
            pos += 1;
            continue;
        }

        let (directive, consumed) = parse_directive(&format[pos..]);
        pos += consumed;
        let Some(directive) = directive else {
            continue;
        };
        // Running out of arguments is treated like a malformed directive.
        let Some(arg) = args.next() else {
            continue;
        };
        count += render_directive(sink, directive, arg);
    }
    count
}

/// Renders to the device through the staging buffer under the output lock.
fn staged_render(format: &[u8], args: &[FormatArg<'_>]) -> usize {
    let mut stage = lock_output();
    stage.reset();
    let mut sink = Sink::Staged { stage: &mut *stage };
    let count = format_into(&mut sink, format, args);
    sink.finish();
    count
}

/// Renders into a caller buffer with no capacity limit applied.
///
/// The caller guarantees the buffer is large enough for the rendered text
/// plus its NUL terminator; exhausting it is a contract violation that
/// halts rather than corrupting memory. Not lock-protected: the
/// destination is caller-owned, so concurrency is the caller's problem.
///
/// Returns the number of bytes rendered, excluding the NUL.
pub fn sprintf(out: &mut [u8], format: &[u8], args: &[FormatArg<'_>]) -> usize {
    let mut sink = Sink::unbounded(out);
    format_into(&mut sink, format, args)
}

/// Renders into a caller buffer of capacity `out.len()`.
///
/// The classic bounded contract: `out` is NUL-terminated whenever its
/// capacity is at least 1, nothing is written beyond its end, and the
/// return value is the length the untruncated rendering would have had.
/// An empty `out` discards all output and only counts.
pub fn snprintf(out: &mut [u8], format: &[u8], args: &[FormatArg<'_>]) -> usize {
    let mut sink = Sink::bounded(out);
    format_into(&mut sink, format, args)
}

/// Renders directly to the console device.
///
/// Acquires the output lock for the whole call, so the rendered text
/// appears as one contiguous block in the device stream even under
/// concurrent callers. Returns the number of bytes rendered.
#[cfg(feature = "logging")]
pub fn printf(format: &[u8], args: &[FormatArg<'_>]) -> usize {
    staged_render(format, args)
}

/// Renders directly to the console device.
///
/// Compiled out by the `logging` feature: a permanent no-op returning 0.
#[cfg(not(feature = "logging"))]
pub fn printf(_format: &[u8], _args: &[FormatArg<'_>]) -> usize {
    0
}

/// Renders to the console device when the calling hart's debug flag is set;
/// otherwise does nothing and returns 0.
pub fn dprintf(debug_prints: bool, format: &[u8], args: &[FormatArg<'_>]) -> usize {
    if !debug_prints {
        return 0;
    }
    staged_render(format, args)
}

/// Renders to the console device unconditionally, then halts. Never
/// returns. The output lock is released before halting.
pub fn fatal(format: &[u8], args: &[FormatArg<'_>]) -> ! {
    staged_render(format, args);
    halt();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders through the bounded sink into a generous buffer and returns
    /// the bytes up to the NUL terminator plus the reported count.
    fn render(format: &[u8], args: &[FormatArg<'_>]) -> (Vec<u8>, usize) {
        let mut buf = [0xaau8; 192];
        let count = snprintf(&mut buf, format, args);
        let end = buf.iter().position(|&b| b == 0).unwrap();
        (buf[..end].to_vec(), count)
    }

    fn rendered(format: &[u8], args: &[FormatArg<'_>]) -> Vec<u8> {
        render(format, args).0
    }

    #[test]
    fn literal_passthrough() {
        let (out, count) = render(b"hello, hart", &[]);
        assert_eq!(out, b"hello, hart");
        assert_eq!(count, 11);
    }

    #[test]
    fn percent_escape() {
        assert_eq!(rendered(b"100%%", &[]), b"100%");
    }

    #[test]
    fn width_pads_with_spaces() {
        assert_eq!(rendered(b"%5d", &[FormatArg::Int(42)]), b"   42");
    }

    #[test]
    fn left_justify_pads_right() {
        assert_eq!(rendered(b"%-5d", &[FormatArg::Int(42)]), b"42   ");
    }

    #[test]
    fn zero_pad_fills_between_sign_and_digits() {
        assert_eq!(rendered(b"%05d", &[FormatArg::Int(-42)]), b"-0042");
    }

    #[test]
    fn space_pad_lands_before_sign() {
        assert_eq!(rendered(b"%5d", &[FormatArg::Int(-42)]), b"  -42");
    }

    #[test]
    fn negative_without_width_keeps_sign_adjacent() {
        assert_eq!(rendered(b"%0d", &[FormatArg::Int(-42)]), b"-42");
    }

    #[test]
    fn alt_form_hex() {
        assert_eq!(rendered(b"%#x", &[FormatArg::Uint(255)]), b"0xff");
        assert_eq!(rendered(b"%#X", &[FormatArg::Uint(255)]), b"0XFF");
    }

    #[test]
    fn alt_form_non_hex_prefixes_bare_zero() {
        assert_eq!(rendered(b"%#d", &[FormatArg::Int(42)]), b"042");
    }

    #[test]
    fn zero_pad_hex_pads_before_prefix() {
        // Padding is applied to the finished content, prefix included.
        assert_eq!(rendered(b"%#06x", &[FormatArg::Uint(255)]), b"000xff");
    }

    #[test]
    fn null_string_renders_placeholder() {
        assert_eq!(rendered(b"%s", &[FormatArg::NullStr]), b"(null)");
    }

    #[test]
    fn string_stops_at_nul() {
        assert_eq!(rendered(b"%s", &[FormatArg::Str(b"ab\0cd")]), b"ab");
    }

    #[test]
    fn string_padding_shares_integer_policy() {
        assert_eq!(rendered(b"%8s", &[FormatArg::Str(b"hart")]), b"    hart");
        assert_eq!(rendered(b"%-8s!", &[FormatArg::Str(b"hart")]), b"hart    !");
        assert_eq!(rendered(b"%05s", &[FormatArg::Str(b"ab")]), b"000ab");
    }

    #[test]
    fn width_smaller_than_content_adds_no_padding() {
        assert_eq!(rendered(b"%2s", &[FormatArg::Str(b"hart")]), b"hart");
        assert_eq!(rendered(b"%3d", &[FormatArg::Int(123456)]), b"123456");
    }

    #[test]
    fn char_conversion_with_width() {
        assert_eq!(rendered(b"%3c", &[FormatArg::Char(b'A')]), b"  A");
        assert_eq!(rendered(b"%-3c|", &[FormatArg::Char(b'A')]), b"A  |");
    }

    #[test]
    fn char_nul_renders_padding_only() {
        let (out, count) = render(b"%3c|", &[FormatArg::Char(0)]);
        assert_eq!(out, b"   |");
        assert_eq!(count, 4);
        let (out, count) = render(b"a%cb", &[FormatArg::Char(0)]);
        assert_eq!(out, b"ab");
        assert_eq!(count, 2);
    }

    #[test]
    fn zero_renders_single_digit() {
        assert_eq!(rendered(b"%d", &[FormatArg::Int(0)]), b"0");
        assert_eq!(rendered(b"%x", &[FormatArg::Uint(0)]), b"0");
        assert_eq!(rendered(b"%#x", &[FormatArg::Uint(0)]), b"0x0");
    }

    #[test]
    fn unqualified_conversions_truncate_to_32_bits() {
        assert_eq!(rendered(b"%d", &[FormatArg::Int(0x10000002a)]), b"42");
        assert_eq!(rendered(b"%u", &[FormatArg::Uint(0x100000001)]), b"1");
        assert_eq!(rendered(b"%x", &[FormatArg::Uint(0xdeadbeefcafe)]), b"beefcafe");
    }

    #[test]
    fn qualified_conversions_use_full_width() {
        assert_eq!(
            rendered(b"%lld", &[FormatArg::Int(i64::MIN)]),
            b"-9223372036854775808"
        );
        assert_eq!(
            rendered(b"%llu", &[FormatArg::Uint(u64::MAX)]),
            b"18446744073709551615"
        );
        assert_eq!(
            rendered(b"%lx", &[FormatArg::Uint(0xdeadbeefcafe)]),
            b"deadbeefcafe"
        );
        assert_eq!(rendered(b"%llX", &[FormatArg::Uint(0xab)]), b"AB");
    }

    #[test]
    fn signed_32_bit_minimum() {
        assert_eq!(
            rendered(b"%d", &[FormatArg::Int(i32::MIN as i64)]),
            b"-2147483648"
        );
    }

    #[test]
    fn qualified_signed_consumes_conversion() {
        // The `d`/`i` after a length modifier belongs to the directive and
        // must not leak into the output as a literal.
        assert_eq!(rendered(b"%lld", &[FormatArg::Int(42)]), b"42");
        assert_eq!(rendered(b"%ld!", &[FormatArg::Int(-7)]), b"-7!");
        assert_eq!(rendered(b"%lli", &[FormatArg::Int(9)]), b"9");
    }

    #[test]
    fn plain_l_is_signed_decimal() {
        assert_eq!(rendered(b"%l", &[FormatArg::Int(-5)]), b"-5");
        // The byte after a bare `l` is not consumed by the directive.
        assert_eq!(rendered(b"%lq", &[FormatArg::Int(7)]), b"7q");
    }

    #[test]
    fn pointer_conversions() {
        assert_eq!(rendered(b"%p", &[FormatArg::Ptr(0xdead)]), b"dead");
        assert_eq!(rendered(b"%P", &[FormatArg::Ptr(0xdead)]), b"DEAD");
        assert_eq!(rendered(b"%#p", &[FormatArg::Ptr(0xdead)]), b"0xdead");
    }

    #[test]
    fn flags_combine_in_any_order() {
        assert_eq!(rendered(b"%0-5d|", &[FormatArg::Int(42)]), b"42   |");
        assert_eq!(rendered(b"%-05d|", &[FormatArg::Int(42)]), b"42   |");
        assert_eq!(rendered(b"%0#6x", &[FormatArg::Uint(255)]), b"000xff");
    }

    #[test]
    fn unknown_conversion_is_dropped() {
        let (out, count) = render(b"a%qb", &[FormatArg::Int(1)]);
        assert_eq!(out, b"ab");
        assert_eq!(count, 2);
    }

    #[test]
    fn trailing_percent_is_dropped() {
        assert_eq!(rendered(b"abc%", &[]), b"abc");
    }

    #[test]
    fn directive_truncated_at_end_stops_silently() {
        let (out, count) = render(b"x%05", &[FormatArg::Int(1)]);
        assert_eq!(out, b"x");
        assert_eq!(count, 1);
    }

    #[test]
    fn missing_argument_drops_directive() {
        let (out, count) = render(b"%d!", &[]);
        assert_eq!(out, b"!");
        assert_eq!(count, 1);
    }

    #[test]
    fn composite_rendering() {
        let (out, count) = render(
            b"hart %u: pc=%#010x sp=%p [%s]\n",
            &[
                FormatArg::Uint(3),
                FormatArg::Uint(0x8020_0000),
                FormatArg::Ptr(0x8100_0000),
                FormatArg::Str(b"running"),
            ],
        );
        assert_eq!(out, b"hart 3: pc=0x80200000 sp=81000000 [running]\n");
        assert_eq!(count, out.len());
    }

    #[test]
    fn bounded_truncates_and_terminates() {
        let mut buf = [0xaau8; 4];
        let count = snprintf(&mut buf, b"%s", &[FormatArg::Str(b"hello")]);
        assert_eq!(&buf, b"hel\0");
        assert_eq!(count, 5);
    }

    #[test]
    fn bounded_capacity_one_writes_only_nul() {
        let mut buf = [0xaau8; 1];
        let count = snprintf(&mut buf, b"%d", &[FormatArg::Int(1234)]);
        assert_eq!(buf, [0]);
        assert_eq!(count, 4);
    }

    #[test]
    fn empty_destination_counts_only() {
        let count = snprintf(&mut [], b"%s and %d", &[FormatArg::Str(b"one"), FormatArg::Int(2)]);
        assert_eq!(count, 9);
    }

    #[test]
    fn truncation_never_changes_count() {
        let args = [FormatArg::Str(b"serialized"), FormatArg::Int(-77)];
        let format = b"<%s:%05d>";
        let full = snprintf(&mut [0u8; 64], format, &args);
        for cap in 0..20 {
            let mut buf = vec![0u8; cap];
            assert_eq!(snprintf(&mut buf, format, &args), full);
        }
    }

    #[test]
    fn equal_buffers_render_identically() {
        let args = [FormatArg::Uint(0xfeed), FormatArg::Str(b"idem")];
        let mut a = [0u8; 10];
        let mut b = [0u8; 10];
        snprintf(&mut a, b"%#x %s!", &args);
        snprintf(&mut b, b"%#x %s!", &args);
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_never_writes_past_capacity() {
        let mut buf = [0xaau8; 8];
        snprintf(&mut buf[..5], b"%s", &[FormatArg::Str(b"overflowing")]);
        // Guard bytes past the capacity are untouched.
        assert_eq!(&buf[5..], &[0xaa, 0xaa, 0xaa]);
        assert_eq!(&buf[..5], b"over\0");
    }

    #[test]
    fn sprintf_renders_and_terminates() {
        let mut buf = [0xaau8; 16];
        let count = sprintf(&mut buf, b"hi %d", &[FormatArg::Int(42)]);
        assert_eq!(&buf[..6], b"hi 42\0");
        assert_eq!(count, 5);
    }

    #[test]
    fn format_string_stops_at_nul() {
        let (out, count) = render(b"ab\0cd%d", &[FormatArg::Int(1)]);
        assert_eq!(out, b"ab");
        assert_eq!(count, 2);
    }

    #[test]
    fn dprintf_gated_off_does_nothing() {
        assert_eq!(dprintf(false, b"invisible %d", &[FormatArg::Int(1)]), 0);
    }
}
