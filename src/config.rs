//! Config module.
//! Fixed inputs for the patch: target file, the script entry to overwrite, and its command.
//! Nothing here is read from the environment or the command line.

use std::fmt;

/// package.json of the Next.js app, relative to the working directory.
pub const TARGET_PATH: &str = "frontend/project-01/package.json";

/// Top-level object holding the npm scripts.
pub const SCRIPTS_KEY: &str = "scripts";

/// Script entry that builds the Cloudflare deployment.
pub const SCRIPT_NAME: &str = "build:cf";

/// Cloudflare build pipeline written into `scripts["build:cf"]`.
/// Stored verbatim, `&quot;` entities and `\n` escapes included.
const CLOUDFLARE_BUILD: &str = concat!(
    r#"NEXT_PUBLIC_SUPABASE_URL=https://yrfxijooswpvdpdseswy.supabase.co "#,
    r#"NEXT_PUBLIC_SUPABASE_ANON_KEY=sb_publishable_rhTyBa4IqqV14nV_B87S7g_zKzDSYTd "#,
    r#"npx @opennextjs/cloudflare@1.16.5 build && "#,
    r#"mv .open-next/worker.js .open-next/_worker.js && "#,
    r#"if [ -d .open-next/assets ] && "#,
    r#"[ "$(ls -A .open-next/assets 2>/dev/null)" ]; then cp -r .open-next/assets/* .open-next/; else echo 'Warning: .open-next/assets is missing or empty; skipping asset copy.' >&2; fi && "#,
    r#"node -e 'require(&quot;fs&quot;).writeFileSync(&quot;.open-next/_routes.json&quot;, "#,
    r#"JSON.stringify({version:1,include:[&quot;/*&quot;],exclude:[&quot;/_next/static/*&quot;,&quot;/favicon.ico&quot;,&quot;/robots.txt&quot;,&quot;/sitemap.xml&quot;,&quot;/404.html&quot;,&quot;/BUILD_ID&quot;]},null,2))' && "#,
    r#"printf 'compatibility_date = &quot;2026-02-01&quot;\ncompatibility_flags = [&quot;nodejs_compat&quot;]\n' > .open-next/wrangler.toml"#,
);

/// Shell command stored under a script entry. Opaque: never parsed or validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildCommand(String);

impl BuildCommand {
    /// The Cloudflare (OpenNext) build command.
    pub fn cloudflare() -> Self {
        Self(CLOUDFLARE_BUILD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self::cloudflare()
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BuildCommand {
    fn from(command: String) -> Self {
        Self(command)
    }
}

impl From<&str> for BuildCommand {
    fn from(command: &str) -> Self {
        Self(command.to_string())
    }
}
