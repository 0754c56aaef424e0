use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use role_editor::{
    EditorConfig, EditorMode, ModuleFilter, PRESETS, PermissionEditor, RoleEditorSession,
    logger::init_logger, render_grid,
};
use ward_client::{HttpClient, PermissionPayload, RbacApi};

/// Role and permission assignment editor
#[derive(Parser)]
#[command(name = "role-editor", version, about = "Edit hospital role permissions")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "WARD_API_URL")]
    api_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "WARD_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List roles
    Roles,
    /// List permission modules with their sizes
    Modules {
        /// Ask the backend instead of grouping the catalog locally
        #[arg(long)]
        remote: bool,
    },
    /// List the built-in presets
    Presets,
    /// Show the permission grid, optionally for a role
    Show(ShowArgs),
    /// Edit an existing role
    Edit(EditArgs),
    /// Create a role
    Create(CreateArgs),
    /// Delete a role
    Delete {
        #[arg(long)]
        role: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Manage the permission catalog
    #[command(subcommand)]
    Permission(PermissionCommand),
}

#[derive(Args)]
struct ShowArgs {
    #[arg(long)]
    role: Option<i64>,
    #[arg(long, default_value = "all")]
    module: String,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    selected_only: bool,
    /// Print the grouped view as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    role: i64,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Clear the selection before applying other changes
    #[arg(long)]
    clear: bool,
    #[command(flatten)]
    changes: SelectionArgs,
    /// Print the result without saving
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[command(flatten)]
    changes: SelectionArgs,
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct SelectionArgs {
    /// Permission code to select
    #[arg(long = "grant", value_name = "CODE")]
    grant: Vec<String>,
    /// Permission code to deselect
    #[arg(long = "revoke", value_name = "CODE")]
    revoke: Vec<String>,
    /// Select a whole module
    #[arg(long = "module-on", value_name = "MODULE")]
    module_on: Vec<String>,
    /// Clear a whole module
    #[arg(long = "module-off", value_name = "MODULE")]
    module_off: Vec<String>,
    /// Toggle one action across a module
    #[arg(long = "toggle-action", value_name = "MODULE:ACTION")]
    toggle_action: Vec<String>,
    /// Union a preset into the selection
    #[arg(long = "preset", value_name = "KEY")]
    preset: Vec<String>,
}

#[derive(Subcommand)]
enum PermissionCommand {
    /// Add a permission to the catalog
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        label: String,
        #[arg(long)]
        module: Option<String>,
    },
    /// Remove a permission from the catalog
    Rm {
        #[arg(long)]
        id: i64,
    },
}

impl SelectionArgs {
    fn apply(&self, editor: &mut PermissionEditor) -> anyhow::Result<()> {
        for key in &self.preset {
            let added = editor.apply_preset_key(key)?;
            println!("Preset {key}: {added} added");
        }
        for module in &self.module_on {
            editor.set_module_selection(module, true);
        }
        for module in &self.module_off {
            editor.set_module_selection(module, false);
        }
        for pair in &self.toggle_action {
            let (module, action) = pair
                .split_once(':')
                .with_context(|| format!("Expected MODULE:ACTION, got {pair}"))?;
            editor.toggle_module_action(module, action);
        }
        for code in &self.grant {
            editor.set_permission_by_code(code, true)?;
        }
        for code in &self.revoke {
            editor.set_permission_by_code(code, false)?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = EditorConfig::from_env();
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }
    if cli.token.is_some() {
        config.token = cli.token.clone();
    }
    config.log_json |= cli.json_logs;

    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(api_url = %config.api_url, "Role editor starting");

    let client = HttpClient::new(&config.client_config())?;
    let mut session = RoleEditorSession::with_search_quiet(Arc::new(client), config.search_debounce);

    match cli.command {
        Command::Roles => {
            session.refresh_roles().await?;
            for role in session.roles() {
                println!(
                    "{:<5} {:<24} {:>4} permissions  {}",
                    role.id,
                    role.name,
                    role.permission_ids.len(),
                    role.description.as_deref().unwrap_or("")
                );
            }
        }
        Command::Modules { remote } => {
            let modules = if remote {
                session.api().permission_modules().await?
            } else {
                session.open(EditorMode::Create).await?;
                session.editor().map(PermissionEditor::modules).unwrap_or_default()
            };
            for m in modules {
                println!("{:<24} {}", m.module, m.count);
            }
        }
        Command::Presets => {
            for preset in PRESETS {
                println!("{:<10} {:<18} {}", preset.key, preset.label, preset.description);
            }
        }
        Command::Show(args) => show(&mut session, args).await?,
        Command::Edit(args) => {
            session.open(EditorMode::Edit(args.role)).await?;
            let editor = session.editor_mut().context("Editor did not open")?;
            if let Some(name) = args.name {
                editor.set_name(name);
            }
            if let Some(description) = args.description {
                editor.set_description(description);
            }
            if args.clear {
                editor.clear_all_selection();
            }
            args.changes.apply(editor)?;
            commit(&mut session, args.dry_run).await?;
        }
        Command::Create(args) => {
            session.open(EditorMode::Create).await?;
            let editor = session.editor_mut().context("Editor did not open")?;
            editor.set_name(args.name);
            editor.set_description(args.description);
            args.changes.apply(editor)?;
            commit(&mut session, args.dry_run).await?;
        }
        Command::Delete { role, yes } => {
            session.open(EditorMode::Edit(role)).await?;
            session.request_delete()?;
            if !yes && !confirm(role)? {
                session.cancel_delete();
                println!("Delete cancelled");
                return Ok(());
            }
            session.confirm_delete().await?;
            println!("Deleted role {role}");
        }
        Command::Permission(cmd) => permission(session.api(), cmd).await?,
    }

    Ok(())
}

async fn show(session: &mut RoleEditorSession<HttpClient>, args: ShowArgs) -> anyhow::Result<()> {
    let mode = args.role.map_or(EditorMode::Create, EditorMode::Edit);
    session.open(mode).await?;
    let editor = session.editor_mut().context("Editor did not open")?;
    editor.set_module_filter(ModuleFilter::parse(&args.module));
    editor.set_search(args.search);
    editor.set_selected_only(args.selected_only);
    editor.expand_all();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&editor.grouped())?);
    } else {
        print!("{}", render_grid(editor));
        let stale = editor.stale_ids();
        if !stale.is_empty() {
            println!("Unknown permission ids kept in selection: {stale:?}");
        }
    }
    Ok(())
}

async fn commit(session: &mut RoleEditorSession<HttpClient>, dry_run: bool) -> anyhow::Result<()> {
    let editor = session.editor_mut().context("Editor did not open")?;
    editor.expand_all();
    print!("{}", render_grid(editor));

    if dry_run {
        let payload = editor.draft().to_payload();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        session.close();
        return Ok(());
    }

    match session.save().await {
        Ok(role) => {
            println!("Saved role {} ({} permissions)", role.id, role.permission_ids.len());
            Ok(())
        }
        Err(err) => {
            if let Some(notice) = session.notice() {
                eprintln!("{}", notice.message);
            }
            Err(err.into())
        }
    }
}

fn confirm(role: i64) -> anyhow::Result<bool> {
    use std::io::Write;

    print!("Delete role {role}? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// One catalog write; the command succeeds as soon as the write does
async fn permission<A: RbacApi>(api: &A, cmd: PermissionCommand) -> anyhow::Result<()> {
    match cmd {
        PermissionCommand::Add { code, label, module } => {
            if code.trim().is_empty() {
                bail!("Permission code is required");
            }
            let perm = api
                .create_permission(&PermissionPayload { code, label, module })
                .await?;
            println!("Created permission {} {}", perm.id, perm.code);
        }
        PermissionCommand::Rm { id } => {
            api.delete_permission(id).await?;
            println!("Deleted permission {id}");
        }
    }
    Ok(())
}
