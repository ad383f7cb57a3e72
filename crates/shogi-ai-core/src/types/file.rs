//! 筋（File）
//!
//! 内部の筋は USI の筋番号そのまま（1筋 = `File1`）。
//! 外部盤面は盤を180度回した向きで筋を数えるため、外部の f 筋は内部の (10 - f) 筋になる。

/// 筋（1筋〜9筋）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    File1 = 0,
    File2 = 1,
    File3 = 2,
    File4 = 3,
    File5 = 4,
    File6 = 5,
    File7 = 6,
    File8 = 7,
    File9 = 8,
}

impl File {
    pub const NUM: usize = 9;

    /// 1筋から9筋の順
    pub const ALL: [File; 9] = [
        File::File1,
        File::File2,
        File::File3,
        File::File4,
        File::File5,
        File::File6,
        File::File7,
        File::File8,
        File::File9,
    ];

    #[inline]
    const fn nth(idx: u8) -> Option<File> {
        if (idx as usize) < File::NUM { Some(File::ALL[idx as usize]) } else { None }
    }

    /// USIの筋文字（'1'〜'9'）
    #[inline]
    pub const fn to_usi_char(self) -> char {
        (b'1' + self as u8) as char
    }

    #[inline]
    pub const fn from_usi_char(c: char) -> Option<File> {
        if !c.is_ascii_digit() {
            return None;
        }
        File::nth((c as u8).wrapping_sub(b'1'))
    }

    /// 外部盤面の筋番号（1〜9）から
    #[inline]
    pub const fn from_external(n: u8) -> Option<File> {
        if n == 0 { None } else { File::nth(9u8.wrapping_sub(n)) }
    }

    /// 外部盤面の筋番号（1〜9）
    #[inline]
    pub const fn external(self) -> u8 {
        9 - self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_external_is_mirrored() {
        assert_eq!(File::from_external(1), Some(File::File9));
        assert_eq!(File::from_external(9), Some(File::File1));
        assert_eq!(File::from_external(0), None);
        assert_eq!(File::from_external(10), None);
        for file in File::ALL {
            assert_eq!(File::from_external(file.external()), Some(file));
        }
    }

    #[test]
    fn test_file_usi_char() {
        assert_eq!(File::File9.to_usi_char(), '9');
        assert_eq!(File::from_usi_char('1'), Some(File::File1));
        assert_eq!(File::from_usi_char('0'), None);
        assert_eq!(File::from_usi_char('a'), None);
    }
}
