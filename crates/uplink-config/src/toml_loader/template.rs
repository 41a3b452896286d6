//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Uplink Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# key_env = "GEMINI_API_KEY"   # environment variable holding the API key
# base_url = "https://generativelanguage.googleapis.com/v1beta"

[chat]
# model = "gemini-2.5-flash"
# system_instruction = "You are UPLINK, a terse field-operations console."
# temperature = 0.7          # 0.0-2.0
# max_output_tokens = 8192   # 1-65536
# grounding = true           # web search grounding, enables citations

[image]
# model = "imagen-4.0-generate-001"   # imagen-* or a Gemini image model
# aspect_ratio = "16:9"      # 1:1, 3:4, 4:3, 9:16, 16:9
# number_of_images = 1       # 1-4
# output_mime_type = "image/jpeg"     # image/jpeg, image/png
# output_dir = "/path/to/images"

[status]
# tick_interval_ms = 1000    # 100-60000
# show_latency = true

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
