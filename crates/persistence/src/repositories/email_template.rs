//! Repository for email template database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EmailTemplateEntity;

/// Repository for email template operations.
#[derive(Clone)]
pub struct EmailTemplateRepository {
    pool: PgPool,
}

impl EmailTemplateRepository {
    /// Creates a new email template repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a template. When `is_active`, sibling templates of the same
    /// type are deactivated first so at most one stays active per type.
    pub async fn create(
        &self,
        tenant_id: Option<Uuid>,
        template_type: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
        is_active: bool,
    ) -> Result<EmailTemplateEntity, sqlx::Error> {
        if is_active {
            self.deactivate_type(tenant_id, template_type).await?;
        }

        sqlx::query_as::<_, EmailTemplateEntity>(
            r#"
            INSERT INTO email_templates (tenant_id, template_type, subject, html_body,
                                         text_body, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tenant_id, template_type, subject, html_body, text_body,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(template_type)
        .bind(subject)
        .bind(html_body)
        .bind(text_body)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a template by id scoped to a tenant.
    pub async fn find_by_id_and_tenant(
        &self,
        id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<EmailTemplateEntity>, sqlx::Error> {
        sqlx::query_as::<_, EmailTemplateEntity>(
            r#"
            SELECT id, tenant_id, template_type, subject, html_body, text_body,
                   is_active, created_at, updated_at
            FROM email_templates
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds the active template of a type for a tenant, falling back to
    /// the global default (tenant_id NULL) when the tenant has none.
    pub async fn find_active(
        &self,
        tenant_id: Uuid,
        template_type: &str,
    ) -> Result<Option<EmailTemplateEntity>, sqlx::Error> {
        sqlx::query_as::<_, EmailTemplateEntity>(
            r#"
            SELECT id, tenant_id, template_type, subject, html_body, text_body,
                   is_active, created_at, updated_at
            FROM email_templates
            WHERE (tenant_id = $1 OR tenant_id IS NULL)
              AND template_type = $2
              AND is_active = TRUE
            ORDER BY tenant_id NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .bind(template_type)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists a tenant's templates, newest first.
    pub async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmailTemplateEntity>, sqlx::Error> {
        sqlx::query_as::<_, EmailTemplateEntity>(
            r#"
            SELECT id, tenant_id, template_type, subject, html_body, text_body,
                   is_active, created_at, updated_at
            FROM email_templates
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts a tenant's templates.
    pub async fn count_by_tenant(&self, tenant_id: Uuid) -> Result<i64, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM email_templates WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    /// Updates a template; absent fields keep their current value. When
    /// the update activates the template, siblings of the same type are
    /// deactivated first.
    pub async fn update(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        subject: Option<&str>,
        html_body: Option<&str>,
        text_body: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<EmailTemplateEntity>, sqlx::Error> {
        if is_active == Some(true) {
            if let Some(existing) = self.find_by_id_and_tenant(id, tenant_id).await? {
                self.deactivate_type(Some(tenant_id), &existing.template_type)
                    .await?;
            }
        }

        sqlx::query_as::<_, EmailTemplateEntity>(
            r#"
            UPDATE email_templates
            SET subject = COALESCE($3, subject),
                html_body = COALESCE($4, html_body),
                text_body = COALESCE($5, text_body),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, template_type, subject, html_body, text_body,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(subject)
        .bind(html_body)
        .bind(text_body)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
    }

    /// Deactivates every template of a type within a tenant scope.
    async fn deactivate_type(
        &self,
        tenant_id: Option<Uuid>,
        template_type: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE email_templates
            SET is_active = FALSE, updated_at = NOW()
            WHERE tenant_id IS NOT DISTINCT FROM $1 AND template_type = $2 AND is_active = TRUE
            "#,
        )
        .bind(tenant_id)
        .bind(template_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
