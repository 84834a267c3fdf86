use minijinja::Environment;
use serde::Serialize;

pub const WELCOME: &str = "index.html";
pub const APP_SHELL: &str = "app.html";
pub const USER_INFO: &str = "main.html";

/// Page templates, compiled into the binary. `.html` names are auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load and parse every page template.
    ///
    /// # Errors
    /// Returns an error if a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(WELCOME, include_str!("../../templates/index.html"))?;
        env.add_template(APP_SHELL, include_str!("../../templates/app.html"))?;
        env.add_template(USER_INFO, include_str!("../../templates/main.html"))?;

        Ok(Self { env })
    }

    /// Render template `name` with `context`.
    ///
    /// # Errors
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}
