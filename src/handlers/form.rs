//! The single-page generation form.
//!
//! The page posts to `/speak` and plays the returned WAV inline with a
//! download link. Voice options are rendered from the catalog with the
//! default voice preselected.

use axum::response::Html;

use crate::core::tts::catalog;

/// Status line shown once the audio is ready.
pub const SUCCESS_MESSAGE: &str = "Audio generated successfully!";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Gemini Text-to-Speech Studio</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  input, select, textarea { width: 100%; box-sizing: border-box; padding: 0.5rem; margin-top: 0.25rem; }
  button { margin-top: 1.5rem; padding: 0.6rem 1.4rem; }
  button:disabled { opacity: 0.6; cursor: progress; }
  #status { margin-top: 1rem; min-height: 1.5rem; }
  #status.error { color: #b00020; }
  #status.success { color: #1b5e20; }
  #result { margin-top: 1rem; }
</style>
</head>
<body>
<h1>Gemini Text-to-Speech Studio</h1>
<form id="tts-form">
  <label for="api_key">Gemini API key</label>
  <input id="api_key" name="api_key" type="password" autocomplete="off">

  <label for="voice">Voice</label>
  <select id="voice" name="voice">
{{VOICE_OPTIONS}}
  </select>

  <label for="style_prompt">Speaking style</label>
  <input id="style_prompt" name="style_prompt" type="text" placeholder="Say cheerfully">

  <label for="script">Script</label>
  <textarea id="script" name="script" rows="6"></textarea>

  <button id="generate" type="submit">Generate</button>
</form>
<div id="status"></div>
<div id="result" hidden>
  <audio id="player" controls></audio>
  <p><a id="download" download="output.wav">Download output.wav</a></p>
</div>
<script>
(function () {
  const form = document.getElementById("tts-form");
  const status = document.getElementById("status");
  const result = document.getElementById("result");
  const player = document.getElementById("player");
  const download = document.getElementById("download");
  const button = document.getElementById("generate");
  let objectUrl = null;

  form.addEventListener("submit", async function (event) {
    event.preventDefault();
    if (button.disabled) { return; }
    button.disabled = true;
    status.className = "";
    status.textContent = "Generating audio...";
    result.hidden = true;

    const payload = {
      api_key: form.api_key.value,
      voice: form.voice.value,
      style_prompt: form.style_prompt.value,
      script: form.script.value
    };

    try {
      const response = await fetch("/speak", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(payload)
      });
      if (!response.ok) {
        let message = response.statusText;
        try { message = (await response.json()).error || message; } catch (_) {}
        throw new Error(message);
      }
      const blob = await response.blob();
      if (objectUrl) { URL.revokeObjectURL(objectUrl); }
      objectUrl = URL.createObjectURL(blob);
      player.src = objectUrl;
      download.href = objectUrl;
      result.hidden = false;
      status.className = "success";
      status.textContent = "{{SUCCESS_MESSAGE}}";
    } catch (err) {
      status.className = "error";
      status.textContent = err.message;
    } finally {
      button.disabled = false;
    }
  });
})();
</script>
</body>
</html>
"#;

/// Render the `<option>` list for the voice selector.
fn voice_options() -> String {
    let default_id = catalog::default_voice().id;
    catalog::list()
        .iter()
        .map(|voice| {
            let label = voice.display_label();
            let selected = if voice.id == default_id {
                " selected"
            } else {
                ""
            };
            format!("    <option value=\"{label}\"{selected}>{label}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_page() -> String {
    PAGE_TEMPLATE
        .replace("{{VOICE_OPTIONS}}", &voice_options())
        .replace("{{SUCCESS_MESSAGE}}", SUCCESS_MESSAGE)
}

/// Serve the form page
pub async fn form_page() -> Html<String> {
    Html(render_page())
}
