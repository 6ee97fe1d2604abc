//! Static art and color tables, plus the loader for the external shark frames.

use crate::art::{ArtGrid, ArtTemplate, Tint};
use crossterm::style::Color;
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::{info, warn};

/* -----------------------------
   Color palettes
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PaletteId {
    TropicalBasic,
    TropicalBright,
    DeepSea,
    Goldfish,
    Angelfish,
    Exotic,
    Common,
    Seahorse,
    Puffer,
    BlueTang,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Palette {
    Single(&'static [Color]),
    Keyed {
        body: &'static [Color],
        fin: &'static [Color],
    },
}

pub(crate) fn palette(id: PaletteId) -> Palette {
    use Color::*;
    match id {
        PaletteId::TropicalBasic => Palette::Single(&[
            DarkMagenta,
            DarkYellow,
            DarkBlue,
            DarkCyan,
            DarkRed,
            DarkGreen,
        ]),
        PaletteId::TropicalBright => Palette::Single(&[Cyan, Blue, Grey]),
        PaletteId::DeepSea => Palette::Single(&[DarkBlue, DarkCyan, Blue, Cyan]),
        PaletteId::Goldfish => Palette::Single(&[DarkYellow, Yellow, DarkRed]),
        PaletteId::Angelfish => Palette::Single(&[Grey, Cyan, DarkCyan]),
        PaletteId::Exotic => Palette::Single(&[DarkMagenta, Magenta, DarkRed]),
        PaletteId::Common => Palette::Single(&[DarkGreen, DarkBlue, DarkCyan]),
        PaletteId::Seahorse => {
            Palette::Single(&[Yellow, DarkYellow, Grey, Cyan, DarkGrey, Red])
        }
        PaletteId::Puffer => Palette::Single(&[DarkYellow, Yellow, Grey]),
        PaletteId::BlueTang => Palette::Keyed {
            body: &[DarkBlue],
            fin: &[DarkYellow, Green, Red, Yellow],
        },
    }
}

pub(crate) const SHARK_COLORS: &[Color] = &[
    Color::DarkGrey,
    Color::White,
    Color::Grey,
    Color::Cyan,
    Color::DarkCyan,
    Color::White,
    Color::Blue,
];

pub(crate) const JELLY_COLORS: &[Color] = &[
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

pub(crate) const CLICK_BUBBLE_COLORS: &[Color] =
    &[Color::DarkCyan, Color::Cyan, Color::Grey, Color::Blue];

pub(crate) const FOOD_GLYPHS: &[char] = &[
    '●', '•', '.', '.', '.', '.', '•', '•', '•', '•', '•', '•', '•', '•', '•',
];

pub(crate) const FOOD_COLORS: &[Color] =
    &[Color::DarkRed, Color::Red, Color::DarkMagenta, Color::Magenta];

pub(crate) const BUBBLE_GLYPHS: &[char] = &['.', '°', 'O', 'o', '○'];

/// Ascending dune ramp for the sea floor, lowest first.
pub(crate) const FLOOR_RAMP: &[char] = &['_', ',', '.', '-', '~', '=', '"', '\'', '`', '‾'];

pub(crate) const FLOOR_COLOR: Color = Color::DarkYellow;
pub(crate) const SEAWEED_COLOR: Color = Color::DarkGreen;
pub(crate) const CRAB_COLOR: Color = Color::DarkRed;
pub(crate) const EEL_COLOR: Color = Color::DarkGreen;
pub(crate) const BUBBLE_COLOR: Color = Color::DarkCyan;

/* -----------------------------
   Fish
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FishCategory {
    SingleLine,
    MultiLineSmall,
    MultiLineLarge,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FishStyle {
    pub(crate) palette: PaletteId,
    pub(crate) forward: ArtTemplate,
    pub(crate) backward: ArtTemplate,
}

const fn line(palette: PaletteId, forward: &'static str, backward: &'static str) -> FishStyle {
    FishStyle {
        palette,
        forward: ArtTemplate::Line(forward),
        backward: ArtTemplate::Line(backward),
    }
}

const fn block(
    palette: PaletteId,
    forward: &'static [&'static str],
    backward: &'static [&'static str],
) -> FishStyle {
    FishStyle {
        palette,
        forward: ArtTemplate::Block(forward),
        backward: ArtTemplate::Block(backward),
    }
}

// Repeated entries weight the draw.
static SINGLE_LINE: [FishStyle; 8] = [
    line(PaletteId::TropicalBasic, "><>", "<><"),
    line(PaletteId::TropicalBasic, "><>", "<><"),
    line(PaletteId::TropicalBasic, "><>", "<><"),
    line(PaletteId::DeepSea, ">-oO>", "<Oo-<"),
    line(PaletteId::DeepSea, ">-oO>", "<Oo-<"),
    line(PaletteId::Goldfish, ">-oO>", "<Oo-<"),
    line(PaletteId::Angelfish, "><(((°>", "<°)))><"),
    line(PaletteId::Exotic, "><(((°>", "<°)))><"),
];

const TANG_FORWARD: &[&[(Tint, &str)]] = &[
    &[(Tint::Fin, r"|\  \\\\__  ")],
    &[(Tint::Fin, r"| \_"), (Tint::Body, r"/   o \")],
    &[(Tint::Fin, "> "), (Tint::Body, "_    (( <_")],
    &[(Tint::Fin, "| / "), (Tint::Body, r"\__+___/")],
    &[(Tint::Fin, "|/    |/    ")],
];

const TANG_BACKWARD: &[&[(Tint, &str)]] = &[
    &[(Tint::Fin, "  __////  /|")],
    &[(Tint::Body, r" / o   \"), (Tint::Fin, "_/ |")],
    &[(Tint::Body, "_> ))    _"), (Tint::Fin, " <")],
    &[(Tint::Body, r"\___+__/"), (Tint::Fin, r" \ |")],
    &[(Tint::Fin, r"    \|    \|")],
];

static MULTI_LINE_SMALL: [FishStyle; 5] = [
    block(
        PaletteId::TropicalBright,
        &[r" \  ", r"\/\", r"/\/", " /  "],
        &[" /", r"/\/", r"\/\", r" \ "],
    ),
    block(
        PaletteId::Angelfish,
        &[
            "  ,",
            r"  |\",
            r", \_\",
            r"|\/ o\",
            r"|/\_>/",
            "` / /",
            "  |/",
            "  `",
        ],
        &[
            "   ,",
            "  /|",
            " /_/ ,",
            r"/o \/|",
            r"\<_/\|",
            r" \ \ `",
            r"  \|",
            "   `",
        ],
    ),
    block(
        PaletteId::Exotic,
        &[
            "   ____",
            r"  /    \",
            r"  \.----\",
            r"|\/    o \",
            "|        <",
            r"|/\   (> /",
            "  /'----/",
            r"  \____/",
        ],
        &[
            "   ____",
            r"  /    \",
            " /----./",
            r"/ o    \/|",
            ">        |",
            r"\ <)   /\|",
            r" \----'\",
            r"  \____/",
        ],
    ),
    block(
        PaletteId::Common,
        &[
            r"|\   \\\\__",
            r"| \_/    o \",
            "> _    (( <_",
            r"| / \__+___/",
            "|/     |/",
        ],
        &[
            "  __////  /|",
            r" / o   \_/ |",
            "_> ))    _ <",
            r"\___+__/ \ |",
            r"    \|    \|",
        ],
    ),
    FishStyle {
        palette: PaletteId::BlueTang,
        forward: ArtTemplate::Keyed(TANG_FORWARD),
        backward: ArtTemplate::Keyed(TANG_BACKWARD),
    },
];

static MULTI_LINE_LARGE: [FishStyle; 2] = [
    block(
        PaletteId::Exotic,
        &[
            "                                 ",
            r"))\           __\~\~\~\______",
            r"))_\    __====            __ \\",
            r"))__\===      ((((       ((@  \\",
            "))__        (((((((           ))",
            r"))_ /===__    ((((     (\/    //",
            "))_/      ====_______________//",
            "))/",
        ],
        &[
            " ",
            "   ______/~/~/~/__           /((",
            " // __            ====__    /_((",
            "//  @))       ))))      ===/__((",
            "))           )))))))        __((",
            r"\\     \)     ))))    __===\ _((",
            r" \\_______________====      \_((",
            r"                             \((",
        ],
    ),
    block(
        PaletteId::DeepSea,
        &[
            r#"                             )","#,
            r"_                           /\\\\",
            r#" ",            _____,,,,,--\\\\\\)"#,
            r#"  \\        ,,;_______\\\\\----""";_"#,
            r#"   )\_.-`'"""""......-------------,o";__________"#,
            r#"   ==.-.,____           """;;;;,__._.==`""#,
            r#"   )/    "   "\""---;...,______:.-""#,
            r#"  //           ")_.-'      _.-`"#,
            r"_.`                    _.-`",
        ],
        &[
            r#"                ,"("#,
            r"               ////\                           _",
            r#"              (//////--,,,,,_____            ,""#,
            r#"            _;"""----/////_______;,,        //"#,
            r#"__________;"o,-------------......"""""`'-._/("#,
            r#"      ""'==._.__,;;;;"""           ____,.-.=="#,
            r#"             "-.:______,...;---""/"   "    \("#,
            r#"                 '-._      `-._("           \\"#,
            "                     '-._                    '._",
        ],
    ),
];

pub(crate) fn fish_styles(category: FishCategory) -> &'static [FishStyle] {
    match category {
        FishCategory::SingleLine => &SINGLE_LINE,
        FishCategory::MultiLineSmall => &MULTI_LINE_SMALL,
        FishCategory::MultiLineLarge => &MULTI_LINE_LARGE,
    }
}

/* -----------------------------
   Puffer: inflation frames (smallest first) and puffed swim frames
------------------------------ */

const PUFFED_FORWARD: &[&str] = &[
    r#" -_  _^`"‾‾"^-_"#,
    r" } \/ ^ ^ ^  o \",
    "  ‾|^ ^{ } ^   <",
    r"    \ ^ ^ ^ ^  /",
    "     ‾`-.__.,-'",
];

const PUFFED_BACKWARD: &[&str] = &[
    r#" _-^"‾‾"'^_  _-"#,
    r"/ o  ^ ^ ^ \/ {",
    ">   ^ { }^ ^|‾",
    r"\  ^ ^ ^ ^ /",
    " `-,.__.-'‾",
];

pub(crate) static PUFFER_FORWARD: [&[&str]; 5] = [
    &[" _  __ ", r" \/^ .\", r#"   \"_<"#],
    &[" _   ___", r" -\/^^ .\", r#"    \"__<"#],
    &["  _  _.-._", r" }_\/^^ o \", r"    \{}   <", "     '---'"],
    &["  _  _.-^._", r" }_\/^ ^ o \", r"   \ ^{} ^ <", r#"    "`-__-'"#],
    PUFFED_FORWARD,
];

pub(crate) static PUFFER_FORWARD_SWIM: [&[&str]; 4] = [
    &[
        r#"     _^`"‾‾"^-_"#,
        r"}‾‾\/ ^ ^ ^  o \",
        " ‾ |^ { }  ^   <",
        r"    \ ^ ^ ^ ^  /",
        "     ‾`-.__.,-'",
    ],
    PUFFED_FORWARD,
    &[
        r#"     _^`"‾‾"^-_"#,
        r"}‾‾\/ ^ ^ ^  o \",
        " ‾ |^ ^ { }^   <",
        r"    \ ^ ^ ^ ^  /",
        "     ‾`-.__.,-'",
    ],
    PUFFED_FORWARD,
];

pub(crate) static PUFFER_BACKWARD: [&[&str]; 5] = [
    &[" __  _", r"/. ^\/", r#">_"/"#],
    &[" ___   _", r"/. ^^\/-", r#">__"/"#],
    &[" _.-._  _", r"/ o ^^\/_{", ">   {}/", " `---`"],
    &[" _.^-._  _", r"/ o ^ ^\/_{", "> ^ {}^ /", r#" `-__-'""#],
    PUFFED_BACKWARD,
];

pub(crate) static PUFFER_BACKWARD_SWIM: [&[&str]; 4] = [
    &[
        r#" _-^"‾‾"'^_"#,
        r"/ o  ^ ^ ^ \/‾‾{",
        ">   ^  { } ^|‾",
        r"\  ^ ^ ^ ^ /",
        " `-,.__.-'‾",
    ],
    PUFFED_BACKWARD,
    &[
        r#" _-^"‾‾"'^_"#,
        r"/ o  ^ ^ ^ \/‾‾{",
        ">   ^{ } ^ ^|‾",
        r"\  ^ ^ ^ ^ /",
        " `-,.__.-'‾",
    ],
    PUFFED_BACKWARD,
];

/* -----------------------------
   Seahorses
------------------------------ */

pub(crate) static SEAHORSE_FORWARD: [&[&str]; 3] = [
    &[
        "      _cC.__",
        "    <(   o (__,-.",
        r#"    <.   _.--="''"#,
        "/'-./ . (",
        r") --  ;__\",
        r"\_.'\ : __)",
        "    <) __/",
        "   <(  /.,",
        r"   <\ \ _))",
        "     '-.-'",
    ],
    &[
        "      _cC.__",
        "    <(   o (__,-.",
        r#"    <.   _.--="''"#,
        " /-./ . (",
        r" )--  ;__\",
        r" \.'\ : __)",
        "    <) __/",
        "   <(  /.,",
        r"   <\ \ _))",
        "     '-.-'",
    ],
    &[
        "      _cC.__",
        "    <(   o (__,-.",
        r#"    <.   _.--="''"#,
        "  /./ . (",
        r"  )-  ;__\",
        r"  \'\ : __)",
        "    <) __/",
        "   <(  /.,",
        r"   <\ \ _))",
        "     '-.-'",
    ],
];

pub(crate) static SEAHORSE_BACKWARD: [&[&str]; 3] = [
    &[
        "     __.Cc_",
        ".-,__) o   )>",
        r#"``"=--._   .>"#,
        r"        ) . \.-`\",
        "       /__;  -- (",
        "      (__ : /`._/",
        r"       \__ (>",
        r"       ,.\  )>",
        "      ((_ / />",
        "       `-.-`",
    ],
    &[
        "     __.Cc_",
        ".-,__) o   )>",
        r#"``"=--._   .>"#,
        r"        ) . \.-\",
        "       /__;  --(",
        "      (__ : /`./",
        r"       \__ (>",
        r"       ,.\  )>",
        "      ((_ / />",
        "       `-.-`",
    ],
    &[
        "     __.Cc_",
        ".-,__) o   )>",
        r#"``"=--._   .>"#,
        r"        ) . \.\",
        "       /__;  -(",
        "      (__ : /`/",
        r"       \__ (>",
        r"       ,.\  )>",
        "      ((_ / />",
        "       `-.-`",
    ],
];

pub(crate) static BABY_SEAHORSE_FORWARD: [&[&str]; 2] = [
    &["  ,_", r"  /.\", "{ >) `", " `((_,", r#" `"`"#],
    &["  ,_", r"  /.\", " {>) `", " `((_,", r#" `"`"#],
];

pub(crate) static BABY_SEAHORSE_BACKWARD: [&[&str]; 2] = [
    &["  _,", r" /.\", "' (<}", ",_))'", r#" '"'"#],
    &["  _,", r" /.\", "' (< }", ",_))'", r#" '"'"#],
];

/* -----------------------------
   Eel head and shark fallback
------------------------------ */

pub(crate) static EEL_HEAD_FORWARD: &[&str] = &[
    "  _       ",
    r#"-'`_"`-._ "#,
    r"   (@)   \",
    "   _.,,.,-'",
    r#"-="-\;,_; "#,
];

pub(crate) static EEL_HEAD_BACKWARD: &[&str] = &[
    "      _",
    r#" _.-'" _''-"#,
    "/    (@)   '",
    "`-,.,,._   ",
    r#" ;_,;/-"=-"#,
];

pub(crate) static SHARK_FALLBACK: &[&str] = &[
    "          __",
    "         / |",
    "   _____/  |________",
    r"  <  o             ~-.",
    r"   `--,____,.--\__.-'",
    r"         \/",
];

/* -----------------------------
   Bottom dwellers and drifters
------------------------------ */

pub(crate) static CRAB_FRAMES: [&[&str]; 2] = [
    &[" _      _", "(<      >)", r" `\,°°,/`", r"//-\__/-\\"],
    &[" _      _", "(<      >)", r" `\,°°,/`", r"\\-\__/-//"],
];

pub(crate) static JELLYFISH_FRAMES: [&[&str]; 8] = [
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "          ). ( ')",
        "          (' ) (",
        "           ).(.)",
        "          ( .').'",
        "          .)' (",
        "           '  ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "          ). ( ')",
        "         (  ' )  )",
        "        (   ).(   )",
        "         (  .').'  )",
        "          .)'   (",
        "            '    ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "         ( ). ( )",
        "        ( (' ) (') )",
        "       (   ).(.)   )",
        "        (  .').'  )",
        "          .)'   (",
        "            '    ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "        (( ). ( ))",
        "      (   (' ) (') )",
        "     (    ).(.)     )",
        "       (   .').'   )",
        "         ( .)' ( )",
        "          '    ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "         ( ). ( )",
        "        ( (' ) (') )",
        "       (   ).(.)    )",
        "         ( .').' )",
        "          .)'  (",
        "            '   ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "          ). ( ')",
        "         (  ' )  )",
        "        (   ).(   )",
        "         (  .').'  )",
        "          .)'   (",
        "            '    ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "          ). ( ')",
        "          (' ) (",
        "           ).(.)",
        "          ( .').'",
        "          .)' (",
        "           '  ).",
    ],
    &[
        "         .-;':'-.",
        "        {'.'.'.'.}",
        "        '-. ._.-='",
        "          ). ( ')",
        "          (' ) (",
        "           ).(.)",
        "          ( .').'",
        "           .)' (",
        "            '  ).",
    ],
];

/// Rows of a jellyfish frame that belong to the bell; the rest are tentacles.
pub(crate) const JELLY_BELL_ROWS: usize = 3;

pub(crate) struct SeaweedSegments {
    pub(crate) base: &'static [&'static str],
    pub(crate) mid: &'static [&'static str],
    pub(crate) top: &'static [&'static str],
}

pub(crate) static SEAWEED: SeaweedSegments = SeaweedSegments {
    base: &["|||", r"/|\", r"\|/"],
    mid: &["|||", "|/|", "/|/", r"|\|"],
    top: &["~/~", "^|^", r"~/\"],
};

/* -----------------------------
   Decorations
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DecorCategory {
    Chest,
    Shell1,
    Shell2,
}

pub(crate) fn decor_colors(category: DecorCategory) -> &'static [Color] {
    use Color::*;
    match category {
        DecorCategory::Chest => &[DarkYellow],
        DecorCategory::Shell1 => &[Cyan, Yellow, White, Grey, DarkGrey],
        DecorCategory::Shell2 => &[Magenta, Yellow, White, Grey, DarkGrey, Red],
    }
}

pub(crate) static CHEST_CLOSED: &[&str] = &[
    "         __________",
    r"        |\_________\",
    r"        |\|___}{___|",
    "        | |--------|",
    r"        \ |   ))   |",
    r"         \└--------┘",
];

pub(crate) static CHEST_OPEN: &[&str] = &[
    "         _________",
    r"        /\___}{___\",
    "       | /       /",
    r"        |\O%O•*o^@\",
    "       %| |-%------|",
    r"     •%o\ | % ))   |",
    r"    .*%.•\└--------┘",
];

pub(crate) static SHELLS: [(DecorCategory, &[&str]); 4] = [
    (
        DecorCategory::Shell1,
        &[
            r#"            _--:":---_"#,
            r"          -\  : | :  /-",
            r"         (\ : ' | ' : /)",
            r"           \ \'.|.'/ /",
            r"             \\'|'//",
            r"            {_`\|/'_}",
        ],
    ),
    (
        DecorCategory::Shell2,
        &[
            r"     /\",
            "   /{`.}",
            " _{;_`-._}",
            r"|  \ `-./",
            r" \_ \ ./",
            r"   \_|/",
        ],
    ),
    (
        DecorCategory::Shell2,
        &[
            r"       /\",
            r"      {.'}\",
            "    {_.-'_;}_",
            r"     \.-' /  |",
            r"      \. / _/",
            r"       \|_/",
        ],
    ),
    (
        DecorCategory::Shell1,
        &[
            r#"               _.--"":""--._"#,
            r"             .' .-'.' '.'-. '.",
            r"            / .' /   '   \ '. \",
            "           ;-.__.--:__:--.__.--;",
            "           ;-.__.--.__.--.__.--;",
            r"            \'. \  :  :  / .' /",
            r"             '.\ '. '. .' / .'",
            "               `'--.:.:.--'`",
        ],
    ),
];

/* -----------------------------
   Shark frames from an external text asset
------------------------------ */

const SHARK_START: &str = "-SHARK-";
const SHARK_END: &str = "-END SHARK-";

#[derive(Debug, Error)]
pub(crate) enum AssetError {
    #[error("could not read shark asset: {0}")]
    Io(#[from] io::Error),
    #[error("marker {0:?} not found")]
    MissingMarker(&'static str),
    #[error("no frames between shark markers")]
    NoFrames,
}

fn is_frame_header(line: &str) -> bool {
    line.trim_end()
        .strip_prefix("frame ")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Trims blank lines at both ends and removes the indentation shared by every
/// non-blank line, so frames line up with each other.
fn normalize_frame(lines: &[&str]) -> Option<Vec<String>> {
    let first = lines.iter().position(|l| !l.trim().is_empty())?;
    let last = lines.iter().rposition(|l| !l.trim().is_empty())?;
    let body = &lines[first..=last];
    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min()
        .unwrap_or(0);
    Some(
        body.iter()
            .map(|l| l.get(indent..).unwrap_or("").trim_end().to_string())
            .collect(),
    )
}

/// Pulls `frame N` blocks out of the section between the shark markers.
pub(crate) fn parse_shark_frames(content: &str) -> Result<Vec<Vec<String>>, AssetError> {
    let start = content
        .find(SHARK_START)
        .ok_or(AssetError::MissingMarker(SHARK_START))?;
    let end = content
        .find(SHARK_END)
        .filter(|&e| e > start)
        .ok_or(AssetError::MissingMarker(SHARK_END))?;
    let section = &content[start + SHARK_START.len()..end];

    let mut frames = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for l in section.lines() {
        if is_frame_header(l) {
            if let Some(done) = current.take() {
                frames.extend(normalize_frame(&done));
            }
            current = Some(Vec::new());
        } else if let Some(lines) = current.as_mut() {
            lines.push(l);
        }
    }
    if let Some(done) = current {
        frames.extend(normalize_frame(&done));
    }

    if frames.is_empty() {
        return Err(AssetError::NoFrames);
    }
    Ok(frames)
}

pub(crate) fn fallback_shark_frames() -> Vec<ArtGrid> {
    vec![ArtGrid::lines_or_placeholder(SHARK_FALLBACK)]
}

/// Shark animation frames. Any problem with the asset degrades to the built-in
/// single frame; this never fails.
pub(crate) fn load_shark_frames(path: &Path) -> Vec<ArtGrid> {
    let parsed = fs::read_to_string(path)
        .map_err(AssetError::from)
        .and_then(|s| parse_shark_frames(&s));
    match parsed {
        Ok(frames) => {
            let grids: Vec<ArtGrid> = frames
                .iter()
                .filter_map(|f| ArtGrid::from_lines(f).ok())
                .collect();
            if grids.is_empty() {
                warn!(path = %path.display(), "shark frames were all blank, using fallback");
                return fallback_shark_frames();
            }
            info!(path = %path.display(), frames = grids.len(), "loaded shark frames");
            grids
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "shark asset unavailable, using fallback");
            fallback_shark_frames()
        }
    }
}
