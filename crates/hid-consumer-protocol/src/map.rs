//! Consumer page usage map

use hidmap::codes::*;
use hidmap::{MapRule, UsagePage};

use crate::volume::REL_VOLUME;

const fn key(usage: u16, code: u16) -> MapRule {
    MapRule::key(UsagePage::CONSUMER, usage, code)
}

/// Every Consumer page usage with a known input event, in lookup order.
pub static CONSUMER_RULES: &[MapRule] = &[
    key(0x030, KEY_POWER),
    key(0x031, KEY_RESTART),
    key(0x032, KEY_SLEEP),
    key(0x034, KEY_SLEEP),
    key(0x035, KEY_KBDILLUMTOGGLE),
    key(0x036, BTN_MISC),
    // Menu navigation
    key(0x040, KEY_MENU),
    key(0x041, KEY_SELECT),
    key(0x042, KEY_UP),
    key(0x043, KEY_DOWN),
    key(0x044, KEY_LEFT),
    key(0x045, KEY_RIGHT),
    key(0x046, KEY_ESC),
    key(0x047, KEY_KPPLUS),
    key(0x048, KEY_KPMINUS),
    // Display and TV controls
    key(0x060, KEY_INFO),
    key(0x061, KEY_SUBTITLE),
    key(0x063, KEY_VCR),
    key(0x065, KEY_CAMERA),
    key(0x069, KEY_RED),
    key(0x06a, KEY_GREEN),
    key(0x06b, KEY_BLUE),
    key(0x06c, KEY_YELLOW),
    key(0x06d, KEY_ASPECT_RATIO),
    key(0x06f, KEY_BRIGHTNESSUP),
    key(0x070, KEY_BRIGHTNESSDOWN),
    key(0x072, KEY_BRIGHTNESS_TOGGLE),
    key(0x073, KEY_BRIGHTNESS_MIN),
    key(0x074, KEY_BRIGHTNESS_MAX),
    key(0x075, KEY_BRIGHTNESS_AUTO),
    key(0x079, KEY_KBDILLUMUP),
    key(0x07a, KEY_KBDILLUMDOWN),
    key(0x07c, KEY_KBDILLUMTOGGLE),
    key(0x082, KEY_VIDEO_NEXT),
    key(0x083, KEY_LAST),
    key(0x084, KEY_ENTER),
    key(0x088, KEY_PC),
    key(0x089, KEY_TV),
    key(0x08a, KEY_WWW),
    key(0x08b, KEY_DVD),
    key(0x08c, KEY_PHONE),
    key(0x08d, KEY_PROGRAM),
    key(0x08e, KEY_VIDEOPHONE),
    key(0x08f, KEY_GAMES),
    key(0x090, KEY_MEMO),
    key(0x091, KEY_CD),
    key(0x092, KEY_VCR),
    key(0x093, KEY_TUNER),
    key(0x094, KEY_EXIT),
    key(0x095, KEY_HELP),
    key(0x096, KEY_TAPE),
    key(0x097, KEY_TV2),
    key(0x098, KEY_SAT),
    key(0x09a, KEY_PVR),
    key(0x09c, KEY_CHANNELUP),
    key(0x09d, KEY_CHANNELDOWN),
    key(0x0a0, KEY_VCR2),
    // Transport
    key(0x0b0, KEY_PLAY),
    key(0x0b1, KEY_PAUSE),
    key(0x0b2, KEY_RECORD),
    key(0x0b3, KEY_FASTFORWARD),
    key(0x0b4, KEY_REWIND),
    key(0x0b5, KEY_NEXTSONG),
    key(0x0b6, KEY_PREVIOUSSONG),
    key(0x0b7, KEY_STOPCD),
    key(0x0b8, KEY_EJECTCD),
    key(0x0bc, KEY_MEDIA_REPEAT),
    key(0x0b9, KEY_SHUFFLE),
    key(0x0bf, KEY_SLOW),
    key(0x0cd, KEY_PLAYPAUSE),
    key(0x0cf, KEY_VOICECOMMAND),
    // Volume: level on absolute fields, pulses on relative ones
    MapRule::abs(UsagePage::CONSUMER, 0x0e0, ABS_VOLUME),
    MapRule::rel_callback(UsagePage::CONSUMER, 0x0e0, &REL_VOLUME),
    key(0x0e2, KEY_MUTE),
    key(0x0e5, KEY_BASSBOOST),
    key(0x0e9, KEY_VOLUMEUP),
    key(0x0ea, KEY_VOLUMEDOWN),
    key(0x0f5, KEY_SLOW),
    // Application launch
    key(0x181, KEY_BUTTONCONFIG),
    key(0x182, KEY_BOOKMARKS),
    key(0x183, KEY_CONFIG),
    key(0x184, KEY_WORDPROCESSOR),
    key(0x185, KEY_EDITOR),
    key(0x186, KEY_SPREADSHEET),
    key(0x187, KEY_GRAPHICSEDITOR),
    key(0x188, KEY_PRESENTATION),
    key(0x189, KEY_DATABASE),
    key(0x18a, KEY_MAIL),
    key(0x18b, KEY_NEWS),
    key(0x18c, KEY_VOICEMAIL),
    key(0x18d, KEY_ADDRESSBOOK),
    key(0x18e, KEY_CALENDAR),
    key(0x18f, KEY_TASKMANAGER),
    key(0x190, KEY_JOURNAL),
    key(0x191, KEY_FINANCE),
    key(0x192, KEY_CALC),
    key(0x193, KEY_PLAYER),
    key(0x194, KEY_FILE),
    key(0x196, KEY_WWW),
    key(0x199, KEY_CHAT),
    key(0x19c, KEY_LOGOFF),
    key(0x19e, KEY_COFFEE),
    key(0x19f, KEY_CONTROLPANEL),
    key(0x1a2, KEY_APPSELECT),
    key(0x1a3, KEY_NEXT),
    key(0x1a4, KEY_PREVIOUS),
    key(0x1a6, KEY_HELP),
    key(0x1a7, KEY_DOCUMENTS),
    key(0x1ab, KEY_SPELLCHECK),
    key(0x1ae, KEY_KEYBOARD),
    key(0x1b1, KEY_SCREENSAVER),
    key(0x1b4, KEY_FILE),
    key(0x1b6, KEY_IMAGES),
    key(0x1b7, KEY_AUDIO),
    key(0x1b8, KEY_VIDEO),
    key(0x1bc, KEY_MESSENGER),
    key(0x1bd, KEY_INFO),
    key(0x1cb, KEY_ASSISTANT),
    // Application control
    key(0x201, KEY_NEW),
    key(0x202, KEY_OPEN),
    key(0x203, KEY_CLOSE),
    key(0x204, KEY_EXIT),
    key(0x207, KEY_SAVE),
    key(0x208, KEY_PRINT),
    key(0x209, KEY_PROPS),
    key(0x21a, KEY_UNDO),
    key(0x21b, KEY_COPY),
    key(0x21c, KEY_CUT),
    key(0x21d, KEY_PASTE),
    key(0x21f, KEY_FIND),
    key(0x221, KEY_SEARCH),
    key(0x222, KEY_GOTO),
    key(0x223, KEY_HOMEPAGE),
    key(0x224, KEY_BACK),
    key(0x225, KEY_FORWARD),
    key(0x226, KEY_STOP),
    key(0x227, KEY_REFRESH),
    key(0x22a, KEY_BOOKMARKS),
    key(0x22d, KEY_ZOOMIN),
    key(0x22e, KEY_ZOOMOUT),
    key(0x22f, KEY_ZOOMRESET),
    key(0x232, KEY_FULL_SCREEN),
    key(0x233, KEY_SCROLLUP),
    key(0x234, KEY_SCROLLDOWN),
    // AC Pan
    MapRule::rel(UsagePage::CONSUMER, 0x238, REL_HWHEEL),
    key(0x23d, KEY_EDIT),
    key(0x25f, KEY_CANCEL),
    key(0x269, KEY_INSERT),
    key(0x26a, KEY_DELETE),
    key(0x279, KEY_REDO),
    key(0x289, KEY_REPLY),
    key(0x28b, KEY_FORWARDMAIL),
    key(0x28c, KEY_SEND),
    key(0x29d, KEY_KBD_LAYOUT_NEXT),
    // Keyboard input assist
    key(0x2c7, KEY_KBDINPUTASSIST_PREV),
    key(0x2c8, KEY_KBDINPUTASSIST_NEXT),
    key(0x2c9, KEY_KBDINPUTASSIST_PREVGROUP),
    key(0x2ca, KEY_KBDINPUTASSIST_NEXTGROUP),
    key(0x2cb, KEY_KBDINPUTASSIST_ACCEPT),
    key(0x2cc, KEY_KBDINPUTASSIST_CANCEL),
    key(0x29f, KEY_SCALE),
];
