// ABOUTME: The fixed enumeration of well-known web and OS theme colors.
// ABOUTME: Holds the stable ids, symbolic names, and the static ARGB fallback table.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

macro_rules! known_colors {
    ($($variant:ident = $id:literal => $argb:literal,)+) => {
        /// A well-known color identified by a stable ordinal.
        ///
        /// Ordinals are persisted and must never be renumbered. Ids `1..=26` and
        /// `168..=174` are OS theme colors that a [`PaletteResolver`] may
        /// override at runtime; `27..=167` are fixed web colors.
        ///
        /// [`PaletteResolver`]: crate::PaletteResolver
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(u16)]
        pub enum KnownColor {
            $($variant = $id,)+
        }

        impl KnownColor {
            /// Every known color in ordinal order.
            pub const ALL: &'static [KnownColor] = &[$(KnownColor::$variant,)+];

            /// Canonical symbolic name, e.g. `"LightGoldenrodYellow"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(KnownColor::$variant => stringify!($variant),)+
                }
            }

            /// Packed ARGB from the static reference table.
            pub const fn default_argb(self) -> u32 {
                match self {
                    $(KnownColor::$variant => $argb,)+
                }
            }
        }
    };
}

known_colors! {
    ActiveBorder = 1 => 0xFFD4D0C8,
    ActiveCaption = 2 => 0xFF0054E3,
    ActiveCaptionText = 3 => 0xFFFFFFFF,
    AppWorkspace = 4 => 0xFF808080,
    Control = 5 => 0xFFECE9D8,
    ControlDark = 6 => 0xFFACA899,
    ControlDarkDark = 7 => 0xFF716F64,
    ControlLight = 8 => 0xFFF1EFE2,
    ControlLightLight = 9 => 0xFFFFFFFF,
    ControlText = 10 => 0xFF000000,
    Desktop = 11 => 0xFF004E98,
    GrayText = 12 => 0xFFACA899,
    Highlight = 13 => 0xFF316AC5,
    HighlightText = 14 => 0xFFFFFFFF,
    HotTrack = 15 => 0xFF000080,
    InactiveBorder = 16 => 0xFFD4D0C8,
    InactiveCaption = 17 => 0xFF7A96DF,
    InactiveCaptionText = 18 => 0xFFD8E4F8,
    Info = 19 => 0xFFFFFFE1,
    InfoText = 20 => 0xFF000000,
    Menu = 21 => 0xFFFFFFFF,
    MenuText = 22 => 0xFF000000,
    ScrollBar = 23 => 0xFFD4D0C8,
    Window = 24 => 0xFFFFFFFF,
    WindowFrame = 25 => 0xFF000000,
    WindowText = 26 => 0xFF000000,
    Transparent = 27 => 0x00FFFFFF,
    AliceBlue = 28 => 0xFFF0F8FF,
    AntiqueWhite = 29 => 0xFFFAEBD7,
    Aqua = 30 => 0xFF00FFFF,
    Aquamarine = 31 => 0xFF7FFFD4,
    Azure = 32 => 0xFFF0FFFF,
    Beige = 33 => 0xFFF5F5DC,
    Bisque = 34 => 0xFFFFE4C4,
    Black = 35 => 0xFF000000,
    BlanchedAlmond = 36 => 0xFFFFEBCD,
    Blue = 37 => 0xFF0000FF,
    BlueViolet = 38 => 0xFF8A2BE2,
    Brown = 39 => 0xFFA52A2A,
    BurlyWood = 40 => 0xFFDEB887,
    CadetBlue = 41 => 0xFF5F9EA0,
    Chartreuse = 42 => 0xFF7FFF00,
    Chocolate = 43 => 0xFFD2691E,
    Coral = 44 => 0xFFFF7F50,
    CornflowerBlue = 45 => 0xFF6495ED,
    Cornsilk = 46 => 0xFFFFF8DC,
    Crimson = 47 => 0xFFDC143C,
    Cyan = 48 => 0xFF00FFFF,
    DarkBlue = 49 => 0xFF00008B,
    DarkCyan = 50 => 0xFF008B8B,
    DarkGoldenrod = 51 => 0xFFB8860B,
    DarkGray = 52 => 0xFFA9A9A9,
    DarkGreen = 53 => 0xFF006400,
    DarkKhaki = 54 => 0xFFBDB76B,
    DarkMagenta = 55 => 0xFF8B008B,
    DarkOliveGreen = 56 => 0xFF556B2F,
    DarkOrange = 57 => 0xFFFF8C00,
    DarkOrchid = 58 => 0xFF9932CC,
    DarkRed = 59 => 0xFF8B0000,
    DarkSalmon = 60 => 0xFFE9967A,
    DarkSeaGreen = 61 => 0xFF8FBC8B,
    DarkSlateBlue = 62 => 0xFF483D8B,
    DarkSlateGray = 63 => 0xFF2F4F4F,
    DarkTurquoise = 64 => 0xFF00CED1,
    DarkViolet = 65 => 0xFF9400D3,
    DeepPink = 66 => 0xFFFF1493,
    DeepSkyBlue = 67 => 0xFF00BFFF,
    DimGray = 68 => 0xFF696969,
    DodgerBlue = 69 => 0xFF1E90FF,
    Firebrick = 70 => 0xFFB22222,
    FloralWhite = 71 => 0xFFFFFAF0,
    ForestGreen = 72 => 0xFF228B22,
    Fuchsia = 73 => 0xFFFF00FF,
    Gainsboro = 74 => 0xFFDCDCDC,
    GhostWhite = 75 => 0xFFF8F8FF,
    Gold = 76 => 0xFFFFD700,
    Goldenrod = 77 => 0xFFDAA520,
    Gray = 78 => 0xFF808080,
    Green = 79 => 0xFF008000,
    GreenYellow = 80 => 0xFFADFF2F,
    Honeydew = 81 => 0xFFF0FFF0,
    HotPink = 82 => 0xFFFF69B4,
    IndianRed = 83 => 0xFFCD5C5C,
    Indigo = 84 => 0xFF4B0082,
    Ivory = 85 => 0xFFFFFFF0,
    Khaki = 86 => 0xFFF0E68C,
    Lavender = 87 => 0xFFE6E6FA,
    LavenderBlush = 88 => 0xFFFFF0F5,
    LawnGreen = 89 => 0xFF7CFC00,
    LemonChiffon = 90 => 0xFFFFFACD,
    LightBlue = 91 => 0xFFADD8E6,
    LightCoral = 92 => 0xFFF08080,
    LightCyan = 93 => 0xFFE0FFFF,
    LightGoldenrodYellow = 94 => 0xFFFAFAD2,
    LightGreen = 95 => 0xFF90EE90,
    LightGray = 96 => 0xFFD3D3D3,
    LightPink = 97 => 0xFFFFB6C1,
    LightSalmon = 98 => 0xFFFFA07A,
    LightSeaGreen = 99 => 0xFF20B2AA,
    LightSkyBlue = 100 => 0xFF87CEFA,
    LightSlateGray = 101 => 0xFF778899,
    LightSteelBlue = 102 => 0xFFB0C4DE,
    LightYellow = 103 => 0xFFFFFFE0,
    Lime = 104 => 0xFF00FF00,
    LimeGreen = 105 => 0xFF32CD32,
    Linen = 106 => 0xFFFAF0E6,
    Magenta = 107 => 0xFFFF00FF,
    Maroon = 108 => 0xFF800000,
    MediumAquamarine = 109 => 0xFF66CDAA,
    MediumBlue = 110 => 0xFF0000CD,
    MediumOrchid = 111 => 0xFFBA55D3,
    MediumPurple = 112 => 0xFF9370DB,
    MediumSeaGreen = 113 => 0xFF3CB371,
    MediumSlateBlue = 114 => 0xFF7B68EE,
    MediumSpringGreen = 115 => 0xFF00FA9A,
    MediumTurquoise = 116 => 0xFF48D1CC,
    MediumVioletRed = 117 => 0xFFC71585,
    MidnightBlue = 118 => 0xFF191970,
    MintCream = 119 => 0xFFF5FFFA,
    MistyRose = 120 => 0xFFFFE4E1,
    Moccasin = 121 => 0xFFFFE4B5,
    NavajoWhite = 122 => 0xFFFFDEAD,
    Navy = 123 => 0xFF000080,
    OldLace = 124 => 0xFFFDF5E6,
    Olive = 125 => 0xFF808000,
    OliveDrab = 126 => 0xFF6B8E23,
    Orange = 127 => 0xFFFFA500,
    OrangeRed = 128 => 0xFFFF4500,
    Orchid = 129 => 0xFFDA70D6,
    PaleGoldenrod = 130 => 0xFFEEE8AA,
    PaleGreen = 131 => 0xFF98FB98,
    PaleTurquoise = 132 => 0xFFAFEEEE,
    PaleVioletRed = 133 => 0xFFDB7093,
    PapayaWhip = 134 => 0xFFFFEFD5,
    PeachPuff = 135 => 0xFFFFDAB9,
    Peru = 136 => 0xFFCD853F,
    Pink = 137 => 0xFFFFC0CB,
    Plum = 138 => 0xFFDDA0DD,
    PowderBlue = 139 => 0xFFB0E0E6,
    Purple = 140 => 0xFF800080,
    Red = 141 => 0xFFFF0000,
    RosyBrown = 142 => 0xFFBC8F8F,
    RoyalBlue = 143 => 0xFF4169E1,
    SaddleBrown = 144 => 0xFF8B4513,
    Salmon = 145 => 0xFFFA8072,
    SandyBrown = 146 => 0xFFF4A460,
    SeaGreen = 147 => 0xFF2E8B57,
    SeaShell = 148 => 0xFFFFF5EE,
    Sienna = 149 => 0xFFA0522D,
    Silver = 150 => 0xFFC0C0C0,
    SkyBlue = 151 => 0xFF87CEEB,
    SlateBlue = 152 => 0xFF6A5ACD,
    SlateGray = 153 => 0xFF708090,
    Snow = 154 => 0xFFFFFAFA,
    SpringGreen = 155 => 0xFF00FF7F,
    SteelBlue = 156 => 0xFF4682B4,
    Tan = 157 => 0xFFD2B48C,
    Teal = 158 => 0xFF008080,
    Thistle = 159 => 0xFFD8BFD8,
    Tomato = 160 => 0xFFFF6347,
    Turquoise = 161 => 0xFF40E0D0,
    Violet = 162 => 0xFFEE82EE,
    Wheat = 163 => 0xFFF5DEB3,
    White = 164 => 0xFFFFFFFF,
    WhiteSmoke = 165 => 0xFFF5F5F5,
    Yellow = 166 => 0xFFFFFF00,
    YellowGreen = 167 => 0xFF9ACD32,
    ButtonFace = 168 => 0xFFF0F0F0,
    ButtonHighlight = 169 => 0xFFFFFFFF,
    ButtonShadow = 170 => 0xFFA0A0A0,
    GradientActiveCaption = 171 => 0xFFB9D1EA,
    GradientInactiveCaption = 172 => 0xFFD7E4F2,
    MenuBar = 173 => 0xFFF0F0F0,
    MenuHighlight = 174 => 0xFF3399FF,
}

/// Lower-cased name -> color, built once on first lookup.
static NAME_TABLE: LazyLock<HashMap<String, KnownColor>> = LazyLock::new(|| {
    KnownColor::ALL
        .iter()
        .map(|&color| (color.name().to_ascii_lowercase(), color))
        .collect()
});

impl KnownColor {
    pub const FIRST_ID: u16 = KnownColor::ActiveBorder as u16;
    pub const LAST_ID: u16 = KnownColor::MenuHighlight as u16;

    /// Look up a color by ordinal. Returns `None` outside `FIRST_ID..=LAST_ID`.
    pub fn from_id(id: u16) -> Option<Self> {
        if (Self::FIRST_ID..=Self::LAST_ID).contains(&id) {
            Some(Self::ALL[(id - Self::FIRST_ID) as usize])
        } else {
            None
        }
    }

    /// Look up a color by symbolic name. Matching ignores ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAME_TABLE.get(&name.to_ascii_lowercase()).copied()
    }

    pub const fn id(self) -> u16 {
        self as u16
    }

    /// True for OS theme colors, the ids a host palette may override.
    pub const fn is_system(self) -> bool {
        let id = self as u16;
        id <= KnownColor::WindowText as u16 || id > KnownColor::YellowGreen as u16
    }

    /// Iterate only the OS theme colors.
    pub fn system() -> impl Iterator<Item = KnownColor> {
        Self::ALL.iter().copied().filter(|c| c.is_system())
    }

    /// Iterate only the fixed web colors (including `Transparent`).
    pub fn web() -> impl Iterator<Item = KnownColor> {
        Self::ALL.iter().copied().filter(|c| !c.is_system())
    }
}

impl std::fmt::Display for KnownColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
