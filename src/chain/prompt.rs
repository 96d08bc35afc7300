//! Prompt rendering for the navigator chain.
//!
//! All limits here count Unicode characters, not bytes, so multi-byte page
//! content never gets cut mid-character.

/// Upper bound on rendered prompt length before page content is clipped.
pub(crate) const PROMPT_CHAR_BUDGET: usize = 10_000;

/// How much page content survives when the budget is exceeded.
pub(crate) const CONTENT_CLIP_CHARS: usize = 4_200;

/// Only the leading part of the URL carries signal for the model.
const URL_RENDER_CHARS: usize = 100;

/// Render the navigation prompt for one round.
pub(crate) fn render(objective: &str, url: &str, browser_content: &str) -> String {
    let url = clip_chars(url, URL_RENDER_CHARS);
    format!(
        r#"You are an agent controlling a browser. You are given:

    (1) an objective that you are trying to achieve
    (2) the URL of your current web page
    (3) a simplified text description of what's visible in the browser window

You can issue these commands:
    SCROLL UP - scroll up one page
    SCROLL DOWN - scroll down one page
    CLICK X - click on a given element. You can only click on links, buttons, and inputs!
    TYPE X "TEXT" - type the specified text into the input with id X
    TYPESUBMIT X "TEXT" - same as TYPE above, except then it presses ENTER to submit the form

The format of the browser content is highly simplified; all formatting elements are stripped.
Interactive elements such as links, inputs, buttons are represented like this:

    <link id=1>text</link>
    <button id=2>text</button>
    <input id=3>text</input>

Based on your given objective, issue whatever command you believe will get you closest to achieving your goal.
You always start on Google; you should submit a search query to Google that will take you to the best page for achieving your objective.
Don't try to interact with elements that you can't see.

EXAMPLE:
==================================================
CURRENT BROWSER CONTENT:
------------------
<link id=1>About</link>
<link id=2>Store</link>
<input id=3 alt="Search"></input>
<button id=4>(Search)</button>
<link id=5>Advertising</link>
<link id=6>Business</link>
------------------
OBJECTIVE: Find a cordless kettle
CURRENT URL: https://www.google.com/
YOUR COMMAND:
TYPESUBMIT 3 "cordless kettle"
==================================================

The current browser content, objective, and current URL follow. Reply with your next command to the browser.

CURRENT BROWSER CONTENT:
------------------
{browser_content}
------------------

OBJECTIVE: {objective}
CURRENT URL: {url}
YOUR COMMAND:
"#
    )
}

/// Keep at most `max_chars` characters of `s`.
pub(crate) fn clip_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
