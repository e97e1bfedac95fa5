/// Generate the template `.splice.toml` written by `splice --init`.
pub fn generate_init_template() -> String {
	r#"# splice rules file
#
# Rules run in order; each one sees the previous rule's output.
# A rule that matches nothing is skipped with a warning unless it is
# `required = true` or `strict = true` is set below.

# File to rewrite, relative to this file. The command line argument wins.
# target = "src/App.tsx"

strict = false

# Structural match: adjacent sibling elements, each closed by its balanced
# closing tag. Attribute values must match exactly.
[[rules]]
name = "control-surface"
elements = [
    { tag = "div", attributes = { className = "grid grid-cols-3 gap-2 sm:gap-3" } },
    { tag = "div", attributes = { className = "flex flex-wrap gap-2 sm:gap-3" } },
]
# scope = "inner" keeps the element's own tags (single element only).
replacement = '''<DashboardStats />'''

# Textual match: a regex where `.` also matches line breaks.
# A lazy `.*?` stops at the first closing marker, even a nested one.
[[rules]]
name = "decision-center"
pattern = '<GlassPanel title="DECISION CENTER"[^>]*>.*?</GlassPanel>'
# occurrences = "all"
# replacement-file = "decision-center.tsx"
replacement = '''<DecisionCenter />'''
"#
	.to_string()
}
