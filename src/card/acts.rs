//! Markup for each act plus the card's style sheet.
//!
//! Every interactive element carries a `data-action` attribute; the content
//! container listens once and dispatches on that attribute, so replacing the
//! act's HTML never leaves listeners behind.

use crate::stage::Stage;
use crate::typewriter::is_space;
use crate::{
    CELEBRATION_BODY, CELEBRATION_TITLE, CONTINUE_LABEL, GIFT_HINT, GIFT_TITLE, GREETING_TITLE,
    REASSURANCE_BODY, REASSURANCE_QUOTE, REASSURANCE_TITLE, REPLAY_LABEL, THAW_HINT, THAW_TITLE,
};

pub(crate) const ACTION_THAW: &str = "thaw";
pub(crate) const ACTION_CONTINUE: &str = "continue";
pub(crate) const ACTION_GIFT: &str = "gift";
pub(crate) const ACTION_REPLAY: &str = "replay";
pub(crate) const ACTION_AUDIO: &str = "audio";

pub(crate) const WORDS_ID: &str = "tc-words";
pub(crate) const THAW_FILL_ID: &str = "tc-thaw-fill";
pub(crate) const THAW_HALO_ID: &str = "tc-thaw-halo";
pub(crate) const THAW_ICON_ID: &str = "tc-thaw-icon";

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn act_markup(stage: Stage) -> String {
    match stage {
        Stage::Gesture => format!(
            r#"<div class="tc-act tc-fade-in">
  <div class="tc-thaw-wrap">
    <div id="{halo}" class="tc-thaw-halo" style="transform:scale(1)"></div>
    <button class="tc-thaw" data-action="{thaw}">
      <div id="{fill}" class="tc-thaw-fill" style="clip-path:inset(100% 0 0 0)"></div>
      <span id="{icon}" class="tc-thaw-icon">&#10052;</span>
    </button>
  </div>
  <h2 class="tc-kicker">{title}</h2>
  <p class="tc-hint">{hint}</p>
</div>"#,
            halo = THAW_HALO_ID,
            thaw = ACTION_THAW,
            fill = THAW_FILL_ID,
            icon = THAW_ICON_ID,
            title = escape_html(THAW_TITLE),
            hint = escape_html(THAW_HINT),
        ),
        Stage::Reassurance => format!(
            r#"<div class="tc-act tc-panel tc-pop-in">
  <div class="tc-sun">&#9728;</div>
  <h3 class="tc-title">{title}</h3>
  <p class="tc-body">{body}</p>
  <div class="tc-quote">{quote}</div>
  <button class="tc-pill" data-action="{action}">{label}</button>
</div>"#,
            title = escape_html(REASSURANCE_TITLE),
            body = escape_html(REASSURANCE_BODY),
            quote = escape_html(REASSURANCE_QUOTE),
            action = ACTION_CONTINUE,
            label = escape_html(CONTINUE_LABEL),
        ),
        Stage::Greeting => format!(
            r#"<div class="tc-act tc-paper tc-pop-in">
  <h2 class="tc-paper-kicker">{title}</h2>
  <div id="{words}" class="tc-words"></div>
  <div class="tc-divider"><i></i><b></b><i></i></div>
</div>"#,
            title = escape_html(GREETING_TITLE),
            words = WORDS_ID,
        ),
        Stage::Gift => format!(
            r#"<div class="tc-act tc-fade-in">
  <h3 class="tc-title">{title}</h3>
  <button class="tc-gift" data-action="{action}">&#127873;</button>
  <p class="tc-hint tc-bounce">{hint}</p>
</div>"#,
            title = escape_html(GIFT_TITLE),
            action = ACTION_GIFT,
            hint = escape_html(GIFT_HINT),
        ),
        Stage::Celebration => format!(
            r#"<div class="tc-act tc-pop-in">
  <h1 class="tc-shine">{title}</h1>
  <p class="tc-body">{body}</p>
  <div class="tc-hearts"><span>&#10084;</span><span>&#10024;</span><span>&#10084;</span></div>
  <button class="tc-link" data-action="{action}">{label}</button>
</div>"#,
            title = escape_html(CELEBRATION_TITLE),
            body = escape_html(CELEBRATION_BODY),
            action = ACTION_REPLAY,
            label = escape_html(REPLAY_LABEL),
        ),
    }
}

/// One revealed greeting token. Whitespace tokens render as a plain space so
/// the line can wrap between words.
pub(crate) fn word_markup(token: &str) -> String {
    if token.chars().all(is_space) {
        " ".to_string()
    } else {
        format!(r#"<span class="tc-word">{}</span>"#, escape_html(token))
    }
}

pub(crate) fn audio_glyph(on: bool) -> &'static str {
    if on { "\u{1F50A}" } else { "\u{1F507}" }
}

/// Styles for the thaw control at a given charge (0-100).
pub(crate) fn thaw_styles(charge: u8) -> (String, String) {
    let c = charge.min(100) as f64;
    let fill = format!("clip-path:inset({}% 0 0 0)", 100.0 - c);
    let halo = format!("transform:scale({:.2})", 1.0 + c / 100.0);
    (fill, halo)
}

pub(crate) const STYLE_SHEET: &str = r#"
#tc-root { position:fixed; inset:0; overflow:hidden; background:#020617; color:#fff;
  display:flex; align-items:center; justify-content:center; user-select:none;
  font-family: Georgia, 'Times New Roman', serif; }
#tc-bg { position:absolute; inset:0; background-size:cover; background-position:center;
  opacity:.4; transform:scale(1.1); transition:background-image 3s ease-in-out; }
#tc-bg::after { content:""; position:absolute; inset:0;
  background:linear-gradient(to top, #020617, transparent, rgba(2,6,23,.4)); }
#tc-audio { position:fixed; top:2rem; right:2rem; z-index:50; padding:.75rem; border-radius:999px;
  background:rgba(255,255,255,.05); border:1px solid rgba(255,255,255,.1); color:#fff; font-size:1.1rem; cursor:pointer; }
#tc-content { position:relative; z-index:40; width:100%; max-width:56rem; padding:0 1.5rem; }
.tc-act { display:flex; flex-direction:column; align-items:center; text-align:center; gap:2rem; }
.tc-thaw-wrap { position:relative; }
.tc-thaw-halo { position:absolute; inset:0; border-radius:999px; background:rgba(34,211,238,.3);
  filter:blur(60px); transition:transform 75ms linear; }
.tc-thaw { position:relative; width:8rem; height:8rem; border-radius:999px; overflow:hidden; cursor:pointer;
  background:rgba(255,255,255,.05); border:2px solid rgba(255,255,255,.2); color:#cffafe; font-size:3rem; }
.tc-thaw-fill { position:absolute; inset:0; background:rgba(6,182,212,.4); transition:clip-path 75ms linear; }
.tc-thaw-icon { position:relative; display:inline-block; transition:transform .6s; }
.tc-thaw-icon.tc-turned { transform:rotate(180deg); }
.tc-kicker { font-weight:300; letter-spacing:.4em; text-transform:uppercase; color:rgba(165,243,252,.8); }
.tc-hint { font-style:italic; color:rgba(255,255,255,.6); font-size:1.5rem; }
.tc-panel { background:rgba(255,255,255,.05); padding:3rem; border-radius:3rem; border:1px solid rgba(255,255,255,.1); }
.tc-sun { font-size:3.5rem; color:#fde68a; animation:tc-spin 12s linear infinite; }
.tc-title { font-size:2.25rem; color:#fef3c7; }
.tc-body { font-size:1.35rem; line-height:1.6; max-width:32rem; opacity:.9; }
.tc-quote { font-style:italic; color:#6ee7b7; font-size:1.25rem; }
.tc-pill { margin-top:1rem; padding:1rem 3rem; border-radius:999px; background:rgba(255,255,255,.1);
  border:1px solid rgba(255,255,255,.3); color:#fff; letter-spacing:.2em; text-transform:uppercase; font-weight:700; cursor:pointer; }
.tc-paper { background:rgba(254,252,232,.95); color:#022c22; border-radius:3rem; padding:3rem;
  box-shadow:0 0 80px rgba(252,211,77,.2); }
.tc-paper-kicker { font-size:.85rem; letter-spacing:.5em; text-transform:uppercase; opacity:.6; }
.tc-words { font-size:2rem; line-height:1.6; }
.tc-word { display:inline-block; animation:tc-word-pop .7s cubic-bezier(.34,1.56,.64,1) forwards; }
.tc-divider { display:flex; gap:.5rem; align-items:center; }
.tc-divider i { width:.5rem; height:.5rem; border-radius:999px; background:rgba(6,78,59,.2); }
.tc-divider b { width:2rem; height:1px; background:rgba(6,78,59,.2); }
.tc-gift { font-size:6rem; padding:4rem; border-radius:999px; cursor:pointer; border:8px solid rgba(255,255,255,.2);
  background:linear-gradient(135deg,#e11d48,#f43f5e,#f59e0b); box-shadow:0 0 50px rgba(225,29,72,.4); }
.tc-shine { font-size:5rem; background:linear-gradient(#fde68a,#fff,#fef3c7); -webkit-background-clip:text; color:transparent; }
.tc-hearts { display:flex; gap:2rem; padding:2rem 3rem; border-radius:999px; background:rgba(255,255,255,.05); font-size:2rem; color:#fb7185; }
.tc-link { background:none; border:none; color:rgba(255,255,255,.4); letter-spacing:.4em; text-transform:uppercase;
  text-decoration:underline; text-underline-offset:12px; cursor:pointer; }
.tc-bounce { animation:tc-bounce 1s infinite; }
.tc-fade-in { animation:tc-fade-in 2.5s ease-out forwards; }
.tc-pop-in { animation:tc-pop-in 1.4s cubic-bezier(.16,1,.3,1) forwards; }
@keyframes tc-spin { from { transform:rotate(0deg); } to { transform:rotate(360deg); } }
@keyframes tc-word-pop { 0% { opacity:0; transform:translateY(20px) scale(.85); filter:blur(8px); }
  100% { opacity:1; transform:none; filter:none; } }
@keyframes tc-pop-in { 0% { opacity:0; transform:scale(.8) translateY(60px); } 100% { opacity:1; transform:none; } }
@keyframes tc-fade-in { from { opacity:0; } to { opacity:1; } }
@keyframes tc-bounce { 0%,100% { transform:translateY(0); } 50% { transform:translateY(-25%); } }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_act_has_its_action() {
        assert!(act_markup(Stage::Gesture).contains(r#"data-action="thaw""#));
        assert!(act_markup(Stage::Reassurance).contains(r#"data-action="continue""#));
        assert!(act_markup(Stage::Gift).contains(r#"data-action="gift""#));
        assert!(act_markup(Stage::Celebration).contains(r#"data-action="replay""#));
        assert!(act_markup(Stage::Greeting).contains(WORDS_ID));
        assert!(!act_markup(Stage::Greeting).contains("data-action"));
    }

    #[test]
    fn copy_is_escaped() {
        let html = act_markup(Stage::Reassurance);
        assert!(html.contains("&quot;Winter is just a season"));
        assert!(act_markup(Stage::Reassurance).contains("Let&#39;s Celebrate You"));
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn words_and_spaces() {
        assert_eq!(word_markup("  "), " ");
        assert_eq!(word_markup("\u{FEFF}"), " ");
        assert_eq!(word_markup("star."), r#"<span class="tc-word">star.</span>"#);
    }

    #[test]
    fn thaw_styles_track_charge() {
        assert_eq!(
            thaw_styles(0),
            ("clip-path:inset(100% 0 0 0)".to_string(), "transform:scale(1.00)".to_string())
        );
        assert_eq!(
            thaw_styles(50),
            ("clip-path:inset(50% 0 0 0)".to_string(), "transform:scale(1.50)".to_string())
        );
    }
}
