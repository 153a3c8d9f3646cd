//! Portfolio markup shared by the controller tests.

pub const PORTFOLIO: &str = r##"<!DOCTYPE html>
<html lang="en">
<body>
  <div class="preloader"><div class="loader"></div></div>

  <nav class="navbar navbar-expand-lg fixed-top">
    <a class="navbar-brand" href="#home">AS</a>
    <button class="navbar-toggler" type="button">Menu</button>
    <div class="navbar-collapse collapse">
      <a class="nav-link" href="#home">Home</a>
      <a class="nav-link" href="#about">About</a>
      <a class="nav-link" href="#projects">Projects</a>
      <a class="nav-link" href="#contact">Contact</a>
    </div>
  </nav>

  <section id="home" class="hero">
    <div class="hero-gradient-orb orb-1"></div>
    <div class="hero-gradient-orb orb-2"></div>
    <div class="hero-gradient-orb orb-3"></div>
    <h1 class="gsap-reveal">Aman Sharma</h1>
    <p class="gsap-reveal">Software engineer</p>
    <div class="hero-image-wrapper"><img src="me.jpg" alt="Portrait"></div>
    <div class="stat"><span class="stat-number" data-count="150">0</span></div>
    <div class="stat"><span class="stat-number" data-count="12">0</span></div>
  </section>

  <section id="about">
    <h2 class="gsap-reveal">About</h2>
    <div class="feature-item">Fast</div>
    <div class="feature-item">Reliable</div>
    <div class="skill-progress" data-width="90%"></div>
    <div class="skill-progress" data-width="75%"></div>
    <span class="skill-tag">Rust</span>
    <span class="skill-tag">Go</span>
    <span class="skill-tag">SQL</span>
    <div class="timeline-item">2024</div>
    <div class="timeline-item">2022</div>
    <div class="timeline-item">2020</div>
    <div class="education-card">B.Tech</div>
  </section>

  <section id="projects">
    <div class="project-card-large">
      <div class="project-image"><img src="a.png" alt="A"></div>
    </div>
    <div class="project-card-large">
      <div class="project-body">No image</div>
    </div>
    <img data-src="lazy-one.png" alt="Lazy one">
    <img data-src="lazy-two.png" alt="Lazy two" src="placeholder.png">
  </section>

  <section id="contact">
    <div class="contact-item">Email</div>
    <div class="contact-item">Phone</div>
    <div class="contact-item">Location</div>
    <form class="contact-form">
      <input type="text" name="name">
      <input type="email" name="email">
      <textarea name="message"></textarea>
      <button type="submit"><i class="fas fa-paper-plane"></i> Send</button>
    </form>
  </section>

  <footer class="footer">
    <div class="footer-brand">AS</div>
    <a href="#">Back to top</a>
    <a href="#missing">Nowhere</a>
  </footer>
</body>
</html>
"##;
