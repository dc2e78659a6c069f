//! Book repository
//!
//! Reads resolve the author and category with a `LEFT JOIN` in the same
//! statement, so a returned book always reflects the rows its foreign keys
//! point at when the query ran.

use bookstore_db::{DbResult, Store};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use super::models::{Book, BookInput, BookRow};

const SELECT_RESOLVED: &str = r#"
    SELECT
        b.id,
        b.title,
        b.description,
        b.author_id,
        b.category_id,
        a.id   AS author_ref,
        a.name AS author_name,
        c.id   AS category_ref,
        c.name AS category_name
    FROM books b
    LEFT JOIN authors a ON a.id = b.author_id
    LEFT JOIN categories c ON c.id = b.category_id
"#;

pub struct BookRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepo<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { pool: store.pool() }
    }

    /// All books, each with author and category resolved.
    pub async fn list(&self) -> DbResult<Vec<Book>> {
        let sql = format!("{SELECT_RESOLVED} ORDER BY b.id");
        let rows: Vec<BookRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Book>> {
        let mut conn = self.pool.acquire().await?;
        fetch_resolved(&mut *conn, id).await
    }

    /// Insert a book and return it resolved.
    ///
    /// A foreign key that points at no row is a constraint violation.
    pub async fn add(&self, input: &BookInput) -> DbResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            "INSERT INTO books (title, description, author_id, category_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.author_id)
        .bind(input.category_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let book = fetch_resolved(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(book)
    }

    /// Overwrite title, description and both links of an existing book.
    ///
    /// Returns `None` when the id is absent.
    pub async fn update(&self, id: i64, input: &BookInput) -> DbResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, description = ?, author_id = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.author_id)
        .bind(input.category_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let book = fetch_resolved(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(book)
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn remove(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

async fn fetch_resolved(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Book>> {
    let sql = format!("{SELECT_RESOLVED} WHERE b.id = ?");
    let row: Option<BookRow> = sqlx::query_as::<Sqlite, BookRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(Book::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::{models::AuthorInput, repo::AuthorRepo};
    use crate::modules::categories::{models::CategoryInput, repo::CategoryRepo};
    use crate::test_support::store;

    fn input(title: &str, author_id: Option<i64>) -> BookInput {
        BookInput {
            title: title.to_string(),
            description: None,
            author_id,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn add_rejects_dangling_author() {
        let store = store().await;
        let result = BookRepo::new(&store).add(&input("Ghost", Some(42))).await;
        assert!(result.is_err());
        assert!(BookRepo::new(&store).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_author_unlinks_books() {
        let store = store().await;
        let author = AuthorRepo::new(&store)
            .add(&AuthorInput {
                name: "Orwell".to_string(),
            })
            .await
            .unwrap();
        let book = BookRepo::new(&store)
            .add(&input("1984", Some(author.id)))
            .await
            .unwrap();
        assert_eq!(book.author.as_ref().map(|a| a.name.as_str()), Some("Orwell"));

        assert!(AuthorRepo::new(&store).remove(author.id).await.unwrap());

        let book = BookRepo::new(&store).get(book.id).await.unwrap().unwrap();
        assert_eq!(book.author_id, None);
        assert_eq!(book.author, None);
    }

    #[tokio::test]
    async fn deleting_category_unlinks_books() {
        let store = store().await;
        let category = CategoryRepo::new(&store)
            .add(&CategoryInput {
                name: "Fiction".to_string(),
            })
            .await
            .unwrap();
        let book = BookRepo::new(&store)
            .add(&BookInput {
                category_id: Some(category.id),
                ..input("1984", None)
            })
            .await
            .unwrap();
        assert_eq!(book.category.as_ref().map(|c| c.name.as_str()), Some("Fiction"));

        assert!(CategoryRepo::new(&store).remove(category.id).await.unwrap());

        let book = BookRepo::new(&store).get(book.id).await.unwrap().unwrap();
        assert_eq!(book.category_id, None);
        assert_eq!(book.category, None);
        assert_eq!(book.title, "1984");
    }

    #[tokio::test]
    async fn update_of_absent_book_is_none() {
        let store = store().await;
        let updated = BookRepo::new(&store).update(9, &input("x", None)).await.unwrap();
        assert!(updated.is_none());
    }
}
