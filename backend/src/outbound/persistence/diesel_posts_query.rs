//! PostgreSQL-backed [`PostsQuery`] implementation using Diesel ORM.
//!
//! The three reads (posts joined to members and users, votes, comments)
//! run in a single transaction so they observe a consistent MVCC snapshot
//! even under concurrent writes. Grouping the child rows under their posts
//! happens in a pure helper so it can be tested without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PostsQuery, PostsQueryError};
use crate::domain::{CommentView, MemberId, PostId, PostView, VoteView};

use super::models::{CommentRow, MemberRow, PostRow, UserRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, members, posts, users, votes};

/// Diesel-backed implementation of the [`PostsQuery`] port.
#[derive(Clone)]
pub struct DieselPostsQuery {
    pool: DbPool,
}

impl DieselPostsQuery {
    /// Create a new query adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostsQueryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PostsQueryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> PostsQueryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(%error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostsQueryError::connection("database connection error")
        }
        _ => PostsQueryError::query("database error"),
    }
}

/// Group vote and comment rows under their posts, preserving post order.
fn assemble_posts(
    rows: Vec<(PostRow, MemberRow, UserRow)>,
    vote_rows: Vec<VoteRow>,
    comment_rows: Vec<CommentRow>,
) -> Vec<PostView> {
    let mut votes_by_post: HashMap<i32, Vec<VoteView>> = HashMap::new();
    for vote in vote_rows {
        votes_by_post.entry(vote.post_id).or_default().push(VoteView {
            id: vote.id,
            member_id: MemberId::new(vote.member_id),
        });
    }

    let mut comments_by_post: HashMap<i32, Vec<CommentView>> = HashMap::new();
    for comment in comment_rows {
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(CommentView {
                id: comment.id,
                member_id: MemberId::new(comment.member_id),
                body: comment.body,
                created_at: comment.created_at,
            });
    }

    rows.into_iter()
        .map(|(post, member, user)| {
            let votes = votes_by_post.remove(&post.id).unwrap_or_default();
            let comments = comments_by_post.remove(&post.id).unwrap_or_default();
            PostView {
                id: PostId::new(post.id),
                title: post.title,
                body: post.body,
                created_at: post.created_at,
                member: member.into_member(user.into_user()),
                votes,
                comments,
            }
        })
        .collect()
}

#[async_trait]
impl PostsQuery for DieselPostsQuery {
    async fn list_recent(&self) -> Result<Vec<PostView>, PostsQueryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, vote_rows, comment_rows) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<(PostRow, MemberRow, UserRow)> = posts::table
                        .inner_join(members::table.inner_join(users::table))
                        .order_by(posts::created_at.desc())
                        .select((
                            PostRow::as_select(),
                            MemberRow::as_select(),
                            UserRow::as_select(),
                        ))
                        .load(conn)
                        .await?;

                    let post_ids: Vec<i32> = rows.iter().map(|(post, _, _)| post.id).collect();

                    let vote_rows: Vec<VoteRow> = votes::table
                        .filter(votes::post_id.eq_any(&post_ids))
                        .select(VoteRow::as_select())
                        .load(conn)
                        .await?;

                    let comment_rows: Vec<CommentRow> = comments::table
                        .filter(comments::post_id.eq_any(&post_ids))
                        .order_by(comments::created_at.asc())
                        .select(CommentRow::as_select())
                        .load(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>((rows, vote_rows, comment_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(assemble_posts(rows, vote_rows, comment_rows))
    }
}

#[cfg(test)]
mod tests {
    //! Row assembly and error-mapping coverage.
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn post_row(id: i32, hour: u32) -> (PostRow, MemberRow, UserRow) {
        (
            PostRow {
                id,
                title: format!("post {id}"),
                body: "body".to_owned(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).single().expect("valid time"),
            },
            MemberRow { id: 10 + id },
            UserRow {
                id: 100 + id,
                username: format!("author{id}"),
                email: format!("author{id}@x.com"),
                first_name: "A".to_owned(),
                last_name: "L".to_owned(),
            },
        )
    }

    #[rstest]
    fn assembly_preserves_post_order() {
        // Rows arrive newest first from the query.
        let rows = vec![post_row(3, 12), post_row(2, 11), post_row(1, 10)];

        let views = assemble_posts(rows, Vec::new(), Vec::new());

        let ids: Vec<i32> = views.iter().map(|view| view.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(views
            .windows(2)
            .all(|pair| pair[0].created_at > pair[1].created_at));
    }

    #[rstest]
    fn votes_and_comments_group_under_their_posts() {
        let rows = vec![post_row(1, 10), post_row(2, 9)];
        let vote_rows = vec![
            VoteRow {
                id: 1,
                post_id: 1,
                member_id: 11,
            },
            VoteRow {
                id: 2,
                post_id: 1,
                member_id: 12,
            },
        ];
        let comment_rows = vec![CommentRow {
            id: 5,
            post_id: 2,
            member_id: 11,
            body: "nice".to_owned(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("valid time"),
        }];

        let views = assemble_posts(rows, vote_rows, comment_rows);

        assert_eq!(views[0].votes.len(), 2);
        assert!(views[0].comments.is_empty());
        assert!(views[1].votes.is_empty());
        assert_eq!(views[1].comments[0].body, "nice");
    }

    #[rstest]
    fn member_and_user_are_joined_into_the_view() {
        let views = assemble_posts(vec![post_row(1, 10)], Vec::new(), Vec::new());

        assert_eq!(views[0].member.id.get(), 11);
        assert_eq!(views[0].member.user.username, "author1");
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, PostsQueryError::Connection { .. }));
    }
}
