//! Member Service
//!
//! Team members managed by administrators. Emails are unique ignoring case,
//! the last administrator cannot be demoted and nobody can delete their own
//! account.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{AddMemberForm, MemberDto, MemberProfileForm};
use crate::domain::{Filter, Member, MemberRole, Repository};
use crate::map_fields;
use crate::shared::error::AppError;
use crate::shared::mapping::MapTo;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_form;

use super::auth_service::hash_password;

map_fields!(MemberProfileForm => Member {
    first_name, last_name, email, phone, job_title, image_url,
    street_address, postal_code, city, date_of_birth,
});

/// Member service trait
#[async_trait]
pub trait MemberService: Send + Sync {
    /// All members, ordered by first name
    async fn list_members(&self) -> Result<Vec<MemberDto>, AppError>;

    async fn get_member(&self, id: i64) -> Result<MemberDto, AppError>;

    /// Create an account with the given password
    async fn add_member(&self, form: AddMemberForm) -> Result<MemberDto, AppError>;

    /// Update profile and role; the password is left unchanged
    async fn update_member(&self, id: i64, form: MemberProfileForm) -> Result<MemberDto, AppError>;

    /// Delete a member on behalf of `actor_id`
    async fn delete_member(&self, actor_id: i64, id: i64) -> Result<(), AppError>;
}

/// MemberService implementation
pub struct MemberServiceImpl {
    members: Arc<dyn Repository<Member>>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl MemberServiceImpl {
    pub fn new(members: Arc<dyn Repository<Member>>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            members,
            id_generator,
        }
    }

    async fn ensure_email_free(&self, email: &str, except: Option<i64>) -> Result<(), AppError> {
        let mut filter = Filter::eq_ignore_case("email", email);
        if let Some(id) = except {
            filter = filter.and(Filter::not_eq("id", id));
        }

        if self.members.exists(&filter).await? {
            return Err(AppError::Conflict(format!(
                "A member with email '{}' already exists",
                email
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn list_members(&self) -> Result<Vec<MemberDto>, AppError> {
        let members = self.members.get_all().await?;
        Ok(members.iter().map(MemberDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_member(&self, id: i64) -> Result<MemberDto, AppError> {
        Ok(MemberDto::from(&self.members.get_by_id(id).await?))
    }

    #[tracing::instrument(skip(self, form), fields(email = %form.profile.email))]
    async fn add_member(&self, form: AddMemberForm) -> Result<MemberDto, AppError> {
        validate_form(&form.profile)?;
        validate_form(&form)?;
        self.ensure_email_free(&form.profile.email, None).await?;

        let mut member: Member = form.profile.map_to();
        member.id = self.id_generator.generate();
        member.role = form.profile.role.unwrap_or_default();
        member.password_hash = hash_password(&form.password)?;

        let member = self.members.add(&member).await?;
        tracing::info!(member_id = member.id, role = %member.role, "member added");

        Ok(MemberDto::from(&member))
    }

    #[tracing::instrument(skip(self, form))]
    async fn update_member(&self, id: i64, form: MemberProfileForm) -> Result<MemberDto, AppError> {
        validate_form(&form)?;
        let existing = self.members.get_by_id(id).await?;
        self.ensure_email_free(&form.email, Some(id)).await?;

        let role = form.role.unwrap_or(existing.role);
        if existing.role.is_admin() && !role.is_admin() {
            let other_admins = Filter::eq("role", MemberRole::Admin.as_str()).and(Filter::not_eq("id", id));
            if !self.members.exists(&other_admins).await? {
                return Err(AppError::Conflict(
                    "The last administrator cannot be demoted".into(),
                ));
            }
        }

        let mut member: Member = form.map_to();
        member.id = id;
        member.role = role;
        member.password_hash = existing.password_hash;
        member.created_at = existing.created_at;
        member.updated_at = Utc::now();

        let member = self.members.update(&member).await?;
        tracing::info!(member_id = id, "member updated");

        Ok(MemberDto::from(&member))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_member(&self, actor_id: i64, id: i64) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::Conflict("You cannot delete your own account".into()));
        }

        // project assignments go with the member (ON DELETE CASCADE)
        self.members.delete(id).await?;
        tracing::info!(member_id = id, "member deleted");
        Ok(())
    }
}
