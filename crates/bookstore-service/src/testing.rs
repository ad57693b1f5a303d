//! In-memory backend for service tests
//!
//! Implements the store and every read repository over plain vectors. A
//! transaction works on a private copy of the tables and publishes it on
//! commit, so a dropped transaction leaves nothing behind.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bookstore_common::auth::JwtService;
use bookstore_core::entities::{
    Book, BookDraft, Genre, NewUser, Order, OrderDetails, OrderItem, OrderLine, User,
};
use bookstore_core::query::{BookQuery, BookSortField, Page, PageRequest, SortOrder};
use bookstore_core::traits::{
    BookRepository, GenreRepository, OrderRepository, RepoResult, Store, StoreTransaction,
    UserRepository,
};
use bookstore_core::value_objects::Quantity;
use bookstore_core::DomainError;
use chrono::{Duration, Utc};

use crate::services::ServiceContext;

#[derive(Debug, Clone, Default)]
struct Tables {
    last_id: i64,
    users: Vec<(User, String)>,
    genres: Vec<Genre>,
    books: Vec<Book>,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Strictly increasing timestamps keep "newest first" deterministic
    fn stamp(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::microseconds(self.last_id)
    }

    fn details(&self, order: &Order) -> OrderDetails {
        let mut items: Vec<&OrderItem> = self
            .items
            .iter()
            .filter(|item| item.order_id == order.id)
            .collect();
        items.sort_by_key(|item| item.id);

        let lines = items
            .into_iter()
            .filter_map(|item| {
                let book = self.books.iter().find(|b| b.id == item.book_id)?;
                let genre = self.genres.iter().find(|g| g.id == book.genre_id);
                Some(OrderLine {
                    item: item.clone(),
                    book_title: book.title.clone(),
                    book_price: book.price,
                    genre_name: genre.map(|g| g.name.clone()),
                })
            })
            .collect();

        OrderDetails {
            order: order.clone(),
            lines,
        }
    }

    fn orders_newest_first(&self, user_id: Option<i64>) -> Vec<OrderDetails> {
        let mut orders: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| user_id.is_none_or(|id| o.user_id == id))
            .collect();
        orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        orders.into_iter().map(|o| self.details(o)).collect()
    }
}

/// Shared in-memory database
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    tables: Arc<Mutex<Tables>>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Service context wired to this backend
    pub fn context(&self) -> ServiceContext {
        let backend = Arc::new(self.clone());
        ServiceContext::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
            Arc::new(JwtService::new("service-test-secret", 3600)),
        )
    }

    /// Insert a user directly, bypassing registration
    pub fn add_user(&self, email: &str) -> i64 {
        let mut tables = self.tables();
        let id = tables.next_id();
        let now = tables.stamp();
        tables.users.push((
            User {
                id,
                username: format!("user{id}"),
                email: email.to_string(),
                created_at: now,
                updated_at: now,
            },
            String::new(),
        ));
        id
    }

    pub fn user_count(&self) -> usize {
        self.tables().users.len()
    }

    pub fn book_count(&self) -> usize {
        self.tables().books.len()
    }

    pub fn order_count(&self) -> usize {
        self.tables().orders.len()
    }

    pub fn order_item_count(&self) -> usize {
        self.tables().items.len()
    }
}

// ============================================================================
// Transactions
// ============================================================================

struct MemoryTransaction {
    shared: Arc<Mutex<Tables>>,
    working: Tables,
}

#[async_trait]
impl Store for TestBackend {
    async fn begin(&self) -> RepoResult<Box<dyn StoreTransaction>> {
        Ok(Box::new(MemoryTransaction {
            shared: Arc::clone(&self.tables),
            working: self.tables().clone(),
        }))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn email_exists(&mut self, email: &str) -> RepoResult<bool> {
        Ok(self.working.users.iter().any(|(u, _)| u.email == email))
    }

    async fn insert_user(&mut self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        if self.working.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let id = self.working.next_id();
        let now = self.working.stamp();
        let user = User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        self.working
            .users
            .push((user.clone(), password_hash.to_string()));
        Ok(user)
    }

    async fn lock_user(&mut self, id: i64) -> RepoResult<bool> {
        Ok(self.working.users.iter().any(|(u, _)| u.id == id))
    }

    async fn find_genre_by_name(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<Genre>> {
        Ok(self
            .working
            .genres
            .iter()
            .find(|g| g.name == name && Some(g.id) != exclude_id)
            .cloned())
    }

    async fn lock_genre(&mut self, id: i64) -> RepoResult<Option<Genre>> {
        Ok(self.working.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn insert_genre(&mut self, name: &str) -> RepoResult<Genre> {
        if self.working.genres.iter().any(|g| g.name == name) {
            return Err(DomainError::GenreNameTaken(name.to_string()));
        }
        let id = self.working.next_id();
        let now = self.working.stamp();
        let genre = Genre {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.working.genres.push(genre.clone());
        Ok(genre)
    }

    async fn save_genre(&mut self, genre: &Genre) -> RepoResult<Genre> {
        let slot = self
            .working
            .genres
            .iter_mut()
            .find(|g| g.id == genre.id)
            .ok_or(DomainError::GenreNotFound(genre.id))?;
        *slot = genre.clone();
        Ok(genre.clone())
    }

    async fn count_books_in_genre(&mut self, genre_id: i64) -> RepoResult<i64> {
        let count = self
            .working
            .books
            .iter()
            .filter(|b| b.genre_id == genre_id && b.is_active())
            .count();
        Ok(count as i64)
    }

    async fn find_book_by_title(
        &mut self,
        title: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<Book>> {
        Ok(self
            .working
            .books
            .iter()
            .find(|b| b.title == title && Some(b.id) != exclude_id)
            .cloned())
    }

    async fn lock_book(&mut self, id: i64) -> RepoResult<Option<Book>> {
        Ok(self.working.books.iter().find(|b| b.id == id).cloned())
    }

    async fn insert_book(&mut self, draft: &BookDraft) -> RepoResult<Book> {
        if self.working.books.iter().any(|b| b.title == draft.title) {
            return Err(DomainError::BookTitleTaken(draft.title.clone()));
        }
        let id = self.working.next_id();
        let now = self.working.stamp();
        let book = Book {
            id,
            title: draft.title.clone(),
            writer: draft.writer.clone(),
            publisher: draft.publisher.clone(),
            publication_year: draft.publication_year,
            price: draft.price.value(),
            stock_quantity: draft.stock_quantity.value(),
            genre_id: draft.genre_id,
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.working.books.push(book.clone());
        Ok(book)
    }

    async fn save_book(&mut self, book: &Book) -> RepoResult<Book> {
        let slot = self
            .working
            .books
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or(DomainError::BookNotFound(book.id))?;
        *slot = book.clone();
        Ok(book.clone())
    }

    async fn count_order_items_for_book(&mut self, book_id: i64) -> RepoResult<i64> {
        let count = self
            .working
            .items
            .iter()
            .filter(|item| item.book_id == book_id)
            .count();
        Ok(count as i64)
    }

    async fn insert_order(&mut self, user_id: i64) -> RepoResult<Order> {
        let id = self.working.next_id();
        let now = self.working.stamp();
        let order = Order {
            id,
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.working.orders.push(order.clone());
        Ok(order)
    }

    async fn insert_order_item(
        &mut self,
        order_id: i64,
        book_id: i64,
        quantity: Quantity,
    ) -> RepoResult<OrderItem> {
        let id = self.working.next_id();
        let now = self.working.stamp();
        let item = OrderItem {
            id,
            order_id,
            book_id,
            quantity: quantity.value(),
            created_at: now,
            updated_at: now,
        };
        self.working.items.push(item.clone());
        Ok(item)
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let this = *self;
        *this.shared.lock().unwrap() = this.working;
        Ok(())
    }
}

// ============================================================================
// Read repositories
// ============================================================================

#[async_trait]
impl UserRepository for TestBackend {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl GenreRepository for TestBackend {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Genre>> {
        Ok(self
            .tables()
            .genres
            .iter()
            .find(|g| g.id == id && g.is_active())
            .cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Genre>> {
        let mut genres: Vec<Genre> = self
            .tables()
            .genres
            .iter()
            .filter(|g| g.is_active())
            .cloned()
            .collect();
        genres.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(genres)
    }
}

fn compare_books(a: &Book, b: &Book, field: BookSortField) -> Ordering {
    let primary = match field {
        BookSortField::Title => a.title.cmp(&b.title),
        BookSortField::Writer => a.writer.cmp(&b.writer),
        BookSortField::Price => a.price.total_cmp(&b.price),
        BookSortField::PublicationYear => a.publication_year.cmp(&b.publication_year),
        BookSortField::StockQuantity => a.stock_quantity.cmp(&b.stock_quantity),
        BookSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl BookRepository for TestBackend {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Book>> {
        Ok(self
            .tables()
            .books
            .iter()
            .find(|b| b.id == id && b.is_active())
            .cloned())
    }

    async fn search(&self, query: &BookQuery) -> RepoResult<Page<Book>> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut books: Vec<Book> = self
            .tables()
            .books
            .iter()
            .filter(|b| b.is_active())
            .filter(|b| {
                needle.as_deref().is_none_or(|n| {
                    [&b.title, &b.writer, &b.publisher]
                        .iter()
                        .any(|field| field.to_lowercase().contains(n))
                })
            })
            .filter(|b| query.min_price.is_none_or(|min| b.price >= min))
            .filter(|b| query.max_price.is_none_or(|max| b.price <= max))
            .filter(|b| query.year.is_none_or(|year| b.publication_year == year))
            .cloned()
            .collect();

        books.sort_by(|a, b| {
            let ordering = compare_books(a, b, query.sort_by);
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(Page::from_vec(books, query.page))
    }

    async fn find_by_genre(&self, genre_id: i64) -> RepoResult<Vec<Book>> {
        Ok(self
            .tables()
            .books
            .iter()
            .filter(|b| b.genre_id == genre_id && b.is_active())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderRepository for TestBackend {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<OrderDetails>> {
        let tables = self.tables();
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| tables.details(o)))
    }

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<OrderDetails>> {
        Ok(self.tables().orders_newest_first(Some(user_id)))
    }

    async fn find_all(&self) -> RepoResult<Vec<OrderDetails>> {
        Ok(self.tables().orders_newest_first(None))
    }

    async fn page_by_user(&self, user_id: i64, page: PageRequest) -> RepoResult<Page<OrderDetails>> {
        Ok(Page::from_vec(
            self.tables().orders_newest_first(Some(user_id)),
            page,
        ))
    }
}
