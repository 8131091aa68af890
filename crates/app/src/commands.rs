//! Command execution against the portal.

use anyhow::Context;
use scholar_application::{ApiError, PortalClient};
use scholar_domain::Credentials;
use scholar_domain::academics::{CurriculumStatus, NewAssessment, NewSubject, PageQuery};
use serde::Serialize;

use crate::cli::{ChatCommands, Commands, CurriculumCommands, RoadmapCommands, SubjectCommands, SyllabusCommands};
use crate::output::{
    assessment_row, conversation_row, curriculum_row, link_row, message_text, node_row, print_one,
    print_out, roadmap_text, subject_detail, subject_row, syllabus_row,
};

#[derive(Serialize)]
struct Done<'a> {
    ok: bool,
    action: &'a str,
}

fn done(json: bool, action: &str, message: String) -> anyhow::Result<()> {
    print_one(json, &Done { ok: true, action }, |_| message.clone())
}

/// Adds a sign-in hint to authorization failures.
fn hint(error: ApiError) -> anyhow::Error {
    if error.is_unauthorized() {
        anyhow::Error::new(error).context("not signed in or session expired; run `scholar login`")
    } else {
        error.into()
    }
}

pub async fn run(client: &PortalClient, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Login { username, password } => {
            client
                .auth()
                .login(&Credentials::new(username.as_str(), password))
                .await
                .context("login failed")?;
            done(json, "login", format!("signed in as {username}"))
        }
        Commands::Logout => {
            client.auth().logout().await?;
            done(json, "logout", "signed out".to_string())
        }
        Commands::Whoami => whoami(client, json).await,
        Commands::Subjects { command } => subjects(client, command, json).await,
        Commands::Syllabi { command } => syllabi(client, command, json).await,
        Commands::Curricula { command } => curricula(client, command, json).await,
        Commands::Roadmap { command } => roadmap(client, command, json).await,
        Commands::Chat { command } => chat(client, command, json).await,
    }
}

async fn whoami(client: &PortalClient, json: bool) -> anyhow::Result<()> {
    let status = client.store().status().await;
    if !client.store().is_authenticated().await {
        return done(json, "whoami", status.display_message());
    }
    let profile = client.auth().me().await.map_err(hint)?;
    print_one(json, &profile, |p| {
        let name = p.full_name.as_deref().unwrap_or(&p.username);
        format!("{name} ({}, {})\n{}", p.username, p.role, status.display_message())
    })
}

async fn subjects(client: &PortalClient, command: SubjectCommands, json: bool) -> anyhow::Result<()> {
    let api = client.subjects();
    match command {
        SubjectCommands::List {
            page,
            page_size,
            search,
        } => {
            let mut query = PageQuery::new(page, page_size);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            let page = api.list(&query).await;
            if json {
                return print_one(json, &page, |_| String::new());
            }
            print_out(json, &page.items, subject_row)?;
            println!("page {} of {} ({} subjects)", page.page, page.page_count(), page.total);
            Ok(())
        }
        SubjectCommands::Show { id } => {
            let subject = api.get(id).await.map_err(hint)?;
            print_one(json, &subject, subject_detail)
        }
        SubjectCommands::Create {
            code,
            name,
            credits,
            description,
        } => {
            let subject = api
                .create(&NewSubject {
                    code,
                    name,
                    credits,
                    description,
                })
                .await
                .map_err(hint)?;
            print_one(json, &subject, subject_row)
        }
        SubjectCommands::Delete { id } => {
            api.delete(id).await.map_err(hint)?;
            done(json, "delete", format!("subject {id} deleted"))
        }
    }
}

async fn syllabi(client: &PortalClient, command: SyllabusCommands, json: bool) -> anyhow::Result<()> {
    let api = client.syllabi();
    match command {
        SyllabusCommands::List { subject_id } => {
            let syllabi = api.list_for_subject(subject_id).await;
            print_out(json, &syllabi, syllabus_row)
        }
        SyllabusCommands::AddAssessment {
            syllabus_id,
            name,
            kind,
            weight,
        } => {
            let assessment = api
                .add_assessment(syllabus_id, &NewAssessment { name, kind, weight })
                .await
                .map_err(hint)?;
            print_one(json, &assessment, assessment_row)
        }
    }
}

async fn curricula(client: &PortalClient, command: CurriculumCommands, json: bool) -> anyhow::Result<()> {
    let api = client.curricula();
    match command {
        CurriculumCommands::List => print_out(json, &api.list().await, curriculum_row),
        CurriculumCommands::Publish { id } => {
            let curriculum = api
                .set_status(id, CurriculumStatus::Published)
                .await
                .map_err(hint)?;
            print_one(json, &curriculum, curriculum_row)
        }
    }
}

async fn roadmap(client: &PortalClient, command: RoadmapCommands, json: bool) -> anyhow::Result<()> {
    let api = client.roadmap();
    match command {
        RoadmapCommands::Show { student_id, order } => {
            if order {
                let nodes = api.study_order(student_id).await.map_err(hint)?;
                print_out(json, &nodes, node_row)
            } else {
                let graph = api.fetch(student_id).await.map_err(hint)?;
                print_one(json, &graph, roadmap_text)
            }
        }
        RoadmapCommands::Link {
            student_id,
            source,
            target,
        } => {
            let link = api.link(student_id, source, target).await.map_err(hint)?;
            print_one(json, &link, link_row)
        }
        RoadmapCommands::Unlink { link_id } => {
            api.unlink(link_id).await.map_err(hint)?;
            done(json, "unlink", format!("link {link_id} removed"))
        }
        RoadmapCommands::Complete { node_id, undo } => {
            let node = api.set_completed(node_id, !undo).await.map_err(hint)?;
            print_one(json, &node, node_row)
        }
    }
}

async fn chat(client: &PortalClient, command: ChatCommands, json: bool) -> anyhow::Result<()> {
    let api = client.chat();
    match command {
        ChatCommands::List => print_out(json, &api.conversations().await, conversation_row),
        ChatCommands::Send {
            message,
            conversation,
            title,
        } => {
            let conversation_id = match conversation {
                Some(id) => id,
                None => api.start(title).await.map_err(hint)?.id,
            };
            let reply = api.send(conversation_id, message).await.map_err(hint)?;
            print_one(json, &reply, message_text)
        }
    }
}
