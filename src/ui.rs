pub fn render_index(today: &str, min_date: &str) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", today)
        .replace("{{MIN_DATE}}", min_date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Comic</title>
  <style>
    :root {
      --paper: #fdfaf3;
      --ink: #26241f;
      --frame: #2f4858;
      --accent: #d94f30;
      --muted: #8b857d;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--paper);
      color: var(--ink);
      font-family: "Trebuchet MS", "Comic Sans MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 28px 16px 40px;
    }

    .popup {
      width: min(820px, 100%);
      background: white;
      border: 3px solid var(--frame);
      border-radius: 10px;
      box-shadow: 8px 8px 0 rgba(47, 72, 88, 0.2);
      padding: 22px 26px 26px;
      display: grid;
      gap: 14px;
    }

    h1 {
      margin: 0;
      font-size: 1.5rem;
      letter-spacing: 0.02em;
    }

    #message-banner {
      display: none;
      padding: 8px 12px;
      border-radius: 6px;
      background: #fff3cd;
      font-size: 0.95rem;
    }

    #message-banner.error {
      display: block;
      background: var(--accent);
      color: white;
    }

    #comic-title {
      margin: 0;
      font-size: 1.05rem;
      font-weight: 600;
      min-height: 1.3em;
    }

    #comic-title.error {
      color: var(--accent);
    }

    #comic-link {
      display: block;
      text-align: center;
    }

    #comic-image {
      max-width: 100%;
      border: 1px solid var(--frame);
      border-radius: 4px;
    }

    #comic-nav {
      display: flex;
      align-items: center;
      justify-content: center;
      gap: 14px;
    }

    #comic-nav button {
      appearance: none;
      border: 2px solid var(--frame);
      border-radius: 8px;
      background: white;
      color: var(--frame);
      font-weight: 700;
      font-size: 0.95rem;
      padding: 8px 16px;
      cursor: pointer;
    }

    #comic-nav button.disabled {
      color: lightgray;
      border-color: lightgray;
      cursor: default;
    }

    #comic-date-form {
      border: 2px solid var(--frame);
      border-radius: 8px;
      padding: 7px 10px;
      font: inherit;
      color: var(--ink);
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
      text-align: center;
    }
  </style>
</head>
<body>
  <main class="popup">
    <h1>Daily Comic</h1>
    <div id="message-banner">Loading comic...</div>
    <p id="comic-title"></p>
    <a id="comic-link" target="_blank" rel="noopener">
      <img id="comic-image" alt="" />
    </a>
    <nav id="comic-nav">
      <button id="previous" type="button">&#8592; Previous</button>
      <input id="comic-date-form" type="date" min="{{MIN_DATE}}" max="{{TODAY}}" value="{{TODAY}}" />
      <button id="next" type="button">Next &#8594;</button>
    </nav>
    <p class="hint">Strips from {{MIN_DATE}} through today. Today's strip is kept offline.</p>
  </main>

  <script>
    const minDate = '{{MIN_DATE}}';
    const maxDate = '{{TODAY}}';

    const banner = document.getElementById('message-banner');
    const title = document.getElementById('comic-title');
    const link = document.getElementById('comic-link');
    const image = document.getElementById('comic-image');
    const previousButton = document.getElementById('previous');
    const nextButton = document.getElementById('next');
    const datePicker = document.getElementById('comic-date-form');

    let comicShown = false;
    let loadSequence = 0;

    const setDisabled = (button, disabled) => {
      button.classList.toggle('disabled', disabled);
    };

    const updateNavButtons = (date) => {
      setDisabled(nextButton, date >= maxDate);
      setDisabled(previousButton, date <= minDate);
    };

    // Calendar-day arithmetic on the YYYY-MM-DD string; UTC accessors keep
    // the viewer's local timezone out of it.
    const shiftDate = (date, deltaDays) => {
      const shifted = new Date(date + 'T00:00:00Z');
      shifted.setUTCDate(shifted.getUTCDate() + deltaDays);
      return shifted.toISOString().slice(0, 10);
    };

    const showLoading = () => {
      banner.classList.remove('error');
      banner.textContent = 'Loading comic...';
      banner.style.display = 'block';
    };

    const showError = (message) => {
      // Until a comic has been shown there is no image to keep on screen, so
      // the error takes the title area; afterwards it goes to the banner and
      // the last good strip stays visible.
      if (comicShown) {
        banner.classList.add('error');
        banner.textContent = message;
      } else {
        banner.style.display = 'none';
        title.classList.add('error');
        title.textContent = message;
      }
    };

    const showComic = (comic) => {
      comicShown = true;
      title.classList.remove('error');
      title.textContent = comic.date + ' - ' + comic.caption;
      link.href = comic.source_url;
      image.src = comic.image;
      image.alt = comic.caption;
      banner.classList.remove('error');
      banner.style.display = 'none';
    };

    const loadComic = async (date) => {
      const sequence = ++loadSequence;
      showLoading();
      try {
        const response = await fetch('/api/comic?date=' + encodeURIComponent(date));
        const body = await response.json();
        // A newer navigation superseded this one; drop the stale response.
        if (sequence !== loadSequence) {
          return;
        }
        if (!response.ok) {
          showError(body.error || 'Unable to load the comic.');
          return;
        }
        showComic(body);
      } catch (err) {
        if (sequence === loadSequence) {
          showError('Error while fetching the comic, please check your internet connection.');
        }
      }
    };

    nextButton.addEventListener('click', () => {
      const current = datePicker.value;
      if (current >= maxDate) {
        return;
      }
      const next = shiftDate(current, 1);
      datePicker.value = next;
      updateNavButtons(next);
      loadComic(next);
    });

    previousButton.addEventListener('click', () => {
      const current = datePicker.value;
      if (current <= minDate) {
        return;
      }
      const previous = shiftDate(current, -1);
      datePicker.value = previous;
      updateNavButtons(previous);
      loadComic(previous);
    });

    datePicker.addEventListener('change', (event) => {
      let date = event.target.value;
      if (date === '' || date < minDate || date > maxDate) {
        date = maxDate;
        datePicker.value = date;
      }
      updateNavButtons(date);
      loadComic(date);
    });

    updateNavButtons(maxDate);
    loadComic(maxDate);
  </script>
</body>
</html>
"#;
