//! Content tables migration
//!
//! Creates the public-facing content schema: projects with their ranking and
//! view-event tables, blog posts, case studies, testimonials, certifications,
//! and the shared tag tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Projects::Summary).text().not_null())
                    .col(ColumnDef::new(Projects::Content).text().null())
                    .col(
                        ColumnDef::new(Projects::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Projects::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // One ranking row per project, created together with the project.
        manager
            .create_table(
                Table::create()
                    .table(ProjectRankings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectRankings::ProjectId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectRankings::EditorialRank)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ProjectRankings::Score)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_rankings_project")
                            .from(ProjectRankings::Table, ProjectRankings::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Append-only view event log, queried by (project, ip, time) for the
        // cooldown window check.
        manager
            .create_table(
                Table::create()
                    .table(ProjectViews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectViews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectViews::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectViews::Ip).string_len(45).not_null())
                    .col(ColumnDef::new(ProjectViews::UserAgent).text().not_null())
                    .col(
                        ColumnDef::new(ProjectViews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_views_project")
                            .from(ProjectViews::Table, ProjectViews::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_views_cooldown")
                    .table(ProjectViews::Table)
                    .col(ProjectViews::ProjectId)
                    .col(ProjectViews::Ip)
                    .col(ProjectViews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_views_created_at")
                    .table(ProjectViews::Table)
                    .col(ProjectViews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tags::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProjectTags::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProjectTags::ProjectId)
                            .col(ProjectTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_tags_project")
                            .from(ProjectTags::Table, ProjectTags::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_tags_tag")
                            .from(ProjectTags::Table, ProjectTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Excerpt).text().not_null())
                    .col(ColumnDef::new(BlogPosts::Content).text().not_null())
                    .col(ColumnDef::new(BlogPosts::CoverImage).string_len(512).null())
                    .col(ColumnDef::new(BlogPosts::Author).string_len(255).not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::ReadTime)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPostTags::BlogPostId).integer().not_null())
                    .col(ColumnDef::new(BlogPostTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BlogPostTags::BlogPostId)
                            .col(BlogPostTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_tags_post")
                            .from(BlogPostTags::Table, BlogPostTags::BlogPostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_tags_tag")
                            .from(BlogPostTags::Table, BlogPostTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CaseStudies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseStudies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseStudies::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(CaseStudies::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CaseStudies::Company).string_len(255).not_null())
                    .col(ColumnDef::new(CaseStudies::Role).string_len(255).not_null())
                    .col(ColumnDef::new(CaseStudies::Duration).string_len(100).not_null())
                    .col(ColumnDef::new(CaseStudies::Overview).text().not_null())
                    .col(ColumnDef::new(CaseStudies::Challenge).text().not_null())
                    .col(ColumnDef::new(CaseStudies::Solution).text().not_null())
                    .col(ColumnDef::new(CaseStudies::Impact).text().not_null())
                    .col(ColumnDef::new(CaseStudies::ImageUrl).string_len(512).null())
                    // Serialized JSON object with headline metrics
                    .col(ColumnDef::new(CaseStudies::Metrics).text().not_null())
                    .col(
                        ColumnDef::new(CaseStudies::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CaseStudies::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CaseStudies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CaseStudies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CaseStudyTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CaseStudyTags::CaseStudyId).integer().not_null())
                    .col(ColumnDef::new(CaseStudyTags::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CaseStudyTags::CaseStudyId)
                            .col(CaseStudyTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_study_tags_case_study")
                            .from(CaseStudyTags::Table, CaseStudyTags::CaseStudyId)
                            .to(CaseStudies::Table, CaseStudies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_study_tags_tag")
                            .from(CaseStudyTags::Table, CaseStudyTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Testimonials::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Testimonials::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Testimonials::Role).string_len(255).not_null())
                    .col(ColumnDef::new(Testimonials::Company).string_len(255).not_null())
                    .col(ColumnDef::new(Testimonials::Content).text().not_null())
                    .col(ColumnDef::new(Testimonials::AvatarUrl).string_len(512).null())
                    .col(
                        ColumnDef::new(Testimonials::Rating)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Testimonials::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Testimonials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Certifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certifications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certifications::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Certifications::Issuer).string_len(255).not_null())
                    .col(ColumnDef::new(Certifications::Date).string_len(100).not_null())
                    .col(ColumnDef::new(Certifications::CredentialUrl).string_len(512).null())
                    .col(ColumnDef::new(Certifications::ImageUrl).string_len(512).null())
                    .col(
                        ColumnDef::new(Certifications::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Certifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Testimonials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CaseStudyTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CaseStudies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectViews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectRankings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Summary,
    Content,
    Featured,
    Views,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProjectRankings {
    Table,
    ProjectId,
    EditorialRank,
    Score,
}

#[derive(DeriveIden)]
enum ProjectViews {
    Table,
    Id,
    ProjectId,
    Ip,
    UserAgent,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ProjectTags {
    Table,
    ProjectId,
    TagId,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    CoverImage,
    Author,
    Published,
    Views,
    ReadTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogPostTags {
    Table,
    BlogPostId,
    TagId,
}

#[derive(DeriveIden)]
enum CaseStudies {
    Table,
    Id,
    Title,
    Slug,
    Company,
    Role,
    Duration,
    Overview,
    Challenge,
    Solution,
    Impact,
    ImageUrl,
    Metrics,
    Featured,
    Published,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CaseStudyTags {
    Table,
    CaseStudyId,
    TagId,
}

#[derive(DeriveIden)]
enum Certifications {
    Table,
    Id,
    Title,
    Issuer,
    Date,
    CredentialUrl,
    ImageUrl,
    OrderIndex,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Testimonials {
    Table,
    Id,
    Name,
    Role,
    Company,
    Content,
    AvatarUrl,
    Rating,
    Featured,
    CreatedAt,
}
